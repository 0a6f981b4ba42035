//! # Task Management System
//!
//! This module provides a task management system for executing work
//! asynchronously across multiple threads. It is designed to be efficient,
//! scalable, and easy to use.
//!
//! ## Architecture Overview
//!
//! The task management system consists of several key components:
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work that can be executed asynchronously
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: Communication channel between the frame thread and worker threads
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks asynchronously and return results
//! 4. Results are processed on the frame thread in `process_completed_tasks()`
//! 5. Results can spawn follow-up tasks
//! 6. The cycle continues until all work is complete
//!
//! ## Performance Considerations
//! - **Task Granularity**: Balance between too small (high overhead) and too large (poor load balancing)
//! - **Memory**: Each task should own its data to avoid excessive cloning
//! - **Blocking**: Avoid blocking operations in tasks that could starve other work

pub mod task;

use log::info;
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use task::{Task, TaskResult};

/// A communication channel between the frame thread and a worker thread.
///
/// This is the core communication primitive that allows the `TaskManager` to
/// distribute work to background threads and receive the results.
///
/// # Fields
/// - `task_sender`: Sends tasks from the frame thread to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tracks number of tasks currently being processed
/// - `_worker`: Handle to the worker thread (kept alive by this struct)
///
/// # Implementation Notes
/// - Each channel is backed by an OS-level thread
/// - Uses MPSC (multi-producer, single-consumer) channels for communication
/// - Automatically cleans up resources when dropped
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating and managing worker threads
/// - Distributing tasks across available workers
/// - Collecting and processing task results
/// - Handling task queuing when all workers are busy
/// - Managing the lifecycle of worker threads
///
/// # Fields
/// - `channels`: Set of active worker channels
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `current_channel`: Index for round-robin scheduling
///
/// # Implementation Notes
/// - Drop-safe: Dropping the manager disconnects the task senders, which ends
///   each worker's receive loop
/// - Panic-safe: Worker thread panics won't crash the application
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// This is set to 1 to ensure tasks are processed in order within each channel.
/// Increasing this value would allow for pipelining but would require more
/// sophisticated task dependency management.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create. Terrain scans are
    ///   CPU-bound, so anything beyond the number of CPU cores buys nothing.
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        info!(
            "Available parallelism: {:?}",
            thread::available_parallelism()
        );

        let mut channels = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    let _ = result_tx.send(result);
                }
            };

            let worker = thread::spawn(task_closure);

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                _worker: worker,
            });
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// This is a low-level method that tries to send a task to a specific
    /// worker. Most users should use `publish_task()` instead, which handles
    /// worker selection automatically.
    ///
    /// # Arguments
    /// * `task` - The task to send to the worker
    /// * `channel_idx` - Index of the target worker channel (must be valid)
    ///
    /// # Returns
    /// - `Ok(())` if the task was successfully sent to the worker
    /// - `Err(task)` if the send failed (e.g., worker disconnected)
    ///
    /// # Notes
    /// - Automatically increments the in-flight task counter on success
    /// - Returns the original task on failure, allowing for requeueing
    /// - Panics if `channel_idx` is out of bounds
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => Err(task.0),
        }
    }

    /// Finds an available worker channel that can accept a new task.
    ///
    /// This implements a round-robin scheduling strategy starting from the last
    /// used channel to ensure even distribution of tasks across all workers.
    /// Channels that have reached their maximum number of in-flight tasks are
    /// automatically skipped.
    ///
    /// # Returns
    /// - `Some(usize)` index of an available channel that can accept a new task
    /// - `None` if all channels are busy or there are no channels available
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        // Check if all channels are full
        if self
            .channels
            .iter()
            .all(|channel| channel.num_tasks_in_flight >= MAX_TASKS_IN_FLIGHT)
        {
            return None;
        }

        // Find next available channel using round-robin
        let start_channel = self.current_channel;
        let mut current = start_channel;

        loop {
            if self.channels[current].num_tasks_in_flight < MAX_TASKS_IN_FLIGHT {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                // This shouldn't happen due to the earlier check
                info!("All channels are full, but missed the first check");
                return None;
            }
        }
    }

    /// Publishes a new task for execution.
    ///
    /// This is the primary method for scheduling work to be done in the
    /// background. The task will be executed as soon as a worker becomes
    /// available, or queued if all workers are busy.
    ///
    /// # Arguments
    /// * `task` - The task to be executed. Must implement the `Task` trait.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on an available worker
    /// - `false` if the task was queued because all workers are busy
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        if self.channels.is_empty() {
            self.queued_tasks.push_back(task);
            return false;
        }

        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Processes any queued tasks if workers are available.
    ///
    /// This method should be called periodically (typically once per frame) to
    /// ensure that queued tasks are processed as workers become available. It
    /// will attempt to schedule as many queued tasks as possible until either
    /// the queue is empty or all workers are busy.
    ///
    /// # Implementation Details
    /// - Processes tasks in FIFO order (oldest first)
    /// - Stops at the first task that can't be scheduled (all workers busy)
    /// - Automatically handles worker disconnection
    /// - Maintains task order within each worker channel
    pub fn process_queued_tasks(&mut self) {
        if self.queued_tasks.is_empty() {
            return;
        }

        // First check if we have any available channels
        match self.find_available_channel() {
            None => {} // No available channels, keep tasks queued
            Some(mut channel_idx) => {
                // Process tasks while we have available channels
                while let Some(task) = self.queued_tasks.pop_front() {
                    match self.try_send_task(task, channel_idx) {
                        Ok(_) => {
                            // Check if next channel is available
                            match self.find_available_channel() {
                                Some(next_idx) => channel_idx = next_idx,
                                None => break, // No more available channels
                            }
                        }
                        Err(task) => {
                            // Channel is disconnected, put task back and stop processing
                            self.queued_tasks.push_front(task);
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Processes all completed task results from worker threads.
    ///
    /// This must be called on the frame thread. It drains every worker's
    /// result channel, runs each result's `handle_result()`, and publishes any
    /// follow-up tasks the results request.
    ///
    /// # Implementation Details
    /// - Processes results in the order they were received per channel
    /// - Can spawn new tasks if the result requests it
    /// - Handles worker disconnection gracefully
    pub fn process_completed_tasks(&mut self) {
        let mut tasks_to_queue = Vec::new();
        for channel in &mut self.channels {
            while let Ok(result) = channel.result_receiver.try_recv() {
                channel.num_tasks_in_flight -= 1;
                let new_tasks = result.handle_result();
                for task in new_tasks {
                    tasks_to_queue.push(task);
                }
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }
    }
}
