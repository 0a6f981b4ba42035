//! # Terrain Scan Task
//!
//! This module defines the `TerrainScanTask` which runs a full terrain scan
//! asynchronously. The task is scheduled whenever the minimap decides its
//! snapshot is missing or out of date, and the finished snapshot is published
//! through [`SharedScanState`] from the worker thread.

use std::sync::Arc;
use std::time::Duration;

use cgmath::Point3;
use log::{debug, error, info};
use web_time::Instant;

use crate::minimap_state::scanning::scan_state::SharedScanState;
use crate::minimap_state::scanning::world_source::{WorldAccessError, WorldSource};
use crate::minimap_state::task_management::task::{Task, TaskResult};

/// A task that scans the terrain around an observer asynchronously.
///
/// This task is responsible for:
/// 1. Running the neighborhood scan against the world
/// 2. Publishing the snapshot into the shared scan state (generation-gated)
/// 3. Reporting the outcome back to the frame thread for logging
pub struct TerrainScanTask {
    /// A thread-safe handle to the world being scanned
    world: Arc<dyn WorldSource>,
    /// Where the finished snapshot is published
    scan_state: Arc<SharedScanState>,
    /// The voxel position the scan is centered on
    observer_pos: Point3<i32>,
    horizontal_radius: u32,
    vertical_range: u32,
    /// Generation reserved for this scan; stale generations never land
    generation: u64,
}

impl TerrainScanTask {
    /// Creates a new terrain scan task.
    ///
    /// # Arguments
    /// * `world` - A thread-safe handle to the world to sample
    /// * `scan_state` - The shared state the snapshot is published into
    /// * `observer_pos` - The voxel position the scan is centered on
    /// * `horizontal_radius` - Requested horizontal radius (clamped by the scan)
    /// * `vertical_range` - Requested column height (clamped by the scan)
    /// * `generation` - Generation number reserved via
    ///   [`SharedScanState::next_generation`]
    pub fn new(
        world: Arc<dyn WorldSource>,
        scan_state: Arc<SharedScanState>,
        observer_pos: Point3<i32>,
        horizontal_radius: u32,
        vertical_range: u32,
        generation: u64,
    ) -> Self {
        TerrainScanTask {
            world,
            scan_state,
            observer_pos,
            horizontal_radius,
            vertical_range,
            generation,
        }
    }
}

impl Task for TerrainScanTask {
    /// Executes the terrain scan on a worker thread.
    ///
    /// The snapshot is published here, not in the result handler, so the frame
    /// thread never carries the scan data itself; the result only reports what
    /// happened.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let started = Instant::now();

        let outcome = match crate::minimap_state::scanning::scan(
            self.world.as_ref(),
            self.observer_pos,
            self.horizontal_radius,
            self.vertical_range,
        ) {
            Ok(snapshot) => {
                let voxels = snapshot.voxel_count();
                let columns = snapshot.grid().width() * snapshot.grid().depth();
                if self.scan_state.publish(self.generation, snapshot) {
                    ScanOutcome::Published { voxels, columns }
                } else {
                    ScanOutcome::Superseded
                }
            }
            Err(error) => ScanOutcome::Failed(error),
        };

        Box::new(TerrainScanTaskResult {
            generation: self.generation,
            origin: self.observer_pos,
            elapsed: started.elapsed(),
            outcome,
        })
    }
}

/// What became of a finished scan.
pub enum ScanOutcome {
    /// The snapshot was installed as the current one.
    Published {
        /// Voxels retained by the scan.
        voxels: usize,
        /// Columns the scan walked.
        columns: usize,
    },
    /// A newer scan landed first; this one was dropped.
    Superseded,
    /// The world refused a query and the scan was abandoned.
    Failed(WorldAccessError),
}

/// The result of a terrain scan task, reported on the frame thread.
pub struct TerrainScanTaskResult {
    generation: u64,
    origin: Point3<i32>,
    elapsed: Duration,
    outcome: ScanOutcome,
}

impl TaskResult for TerrainScanTaskResult {
    /// Logs the scan outcome. The snapshot itself was already published from
    /// the worker, so no follow-up tasks are needed.
    fn handle_result(self: Box<Self>) -> Vec<Box<dyn Task + Send>> {
        match self.outcome {
            ScanOutcome::Published { voxels, columns } => {
                info!(
                    "Scan {} around ({}, {}, {}) published {} voxels across {} columns in {:?}",
                    self.generation,
                    self.origin.x,
                    self.origin.y,
                    self.origin.z,
                    voxels,
                    columns,
                    self.elapsed
                );
            }
            ScanOutcome::Superseded => {
                debug!(
                    "Scan {} superseded after {:?}, dropped",
                    self.generation, self.elapsed
                );
            }
            ScanOutcome::Failed(error) => {
                error!("Scan {} failed: {}", self.generation, error);
            }
        }
        Vec::new()
    }
}
