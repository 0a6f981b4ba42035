//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which provides a framework for executing work asynchronously across multiple threads.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed asynchronously
//! - `TaskResult`: Represents the result of a completed task
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the frame thread
//! 5. The result can spawn follow-up tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back to the frame thread
//! - Tasks own their inputs; shared state travels behind `Arc`

/// A trait representing a unit of work that can be executed asynchronously.
///
/// Tasks are the primary mechanism for offloading work from the frame thread
/// to background workers. They should be designed to be self-contained and own
/// all the data they need to perform their work.
///
/// # Implementation Guidelines
/// - Must be `Send` to be transferred between threads
/// - Should be coarse-grained enough to amortize scheduling overhead
/// - Should publish results through shared handles (`Arc`) carried by the
///   task itself, never through thread-local state
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// This method contains the actual work to be performed asynchronously.
    /// It runs on a background thread and should handle its errors internally,
    /// folding them into the returned result.
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be processed on the frame thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// A trait representing the result of processing a `Task`.
///
/// Task results are processed on the frame thread and can schedule follow-up
/// work. They should be lightweight; anything expensive belongs in
/// [`Task::process`].
pub trait TaskResult: Send {
    /// Handles the result of a completed task on the frame thread.
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>) -> Vec<Box<dyn Task + Send>>;
}
