//! # Scanning Tasks
//!
//! Asynchronous tasks that run terrain scans on the worker pool and hand
//! their snapshots to the frame thread through shared scan state.

pub mod terrain_scan_task;
