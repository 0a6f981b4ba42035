//! # Minimap State Management
//!
//! The top-level coordinator for the minimap pipeline. Each frame the host
//! hands in where the observer stands and which way it faces; this module
//! routes that through the camera, decides whether a new terrain scan is
//! needed, moves finished scans from the worker pool into the renderer, and
//! returns the composited pixels.
//!
//! ## Pipeline Overview
//!
//! ```text
//! WorldSource -> TerrainScanTask (workers) -> SharedScanState
//!                                                  |
//! Observer yaw -> CameraState ----------------> MinimapRenderer -> PixelBuffer
//! ```
//!
//! Scans run on the task system's worker threads; everything else happens on
//! the frame thread. The renderer's pixel cache is invalidated by exactly two
//! events: a freshly published snapshot, or a camera yaw change that survives
//! the dead zone.

use std::sync::Arc;

use cgmath::Point3;
use log::debug;

use camera_state::{CameraState, ViewportSize};
use config::MinimapConfig;
use rendering::pixel_buffer::PixelBuffer;
use rendering::MinimapRenderer;
use scanning::scan_state::SharedScanState;
use scanning::tasks::terrain_scan_task::TerrainScanTask;
use scanning::world_source::WorldSource;
use task_management::TaskManager;

pub mod camera_state;
pub mod classification;
pub mod config;
pub mod rendering;
pub mod scanning;
pub mod task_management;
pub mod voxels;

/// Per-frame input: where the observer is and which way it faces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observer {
    /// Voxel position the scan window is centered on.
    pub position: Point3<i32>,
    /// Facing yaw in degrees; the camera chases this with smoothing.
    pub yaw_degrees: f32,
}

impl Observer {
    /// Creates an observer at a position with a facing yaw.
    pub fn new(position: Point3<i32>, yaw_degrees: f32) -> Self {
        Observer {
            position,
            yaw_degrees,
        }
    }
}

/// Owns every stage of the minimap pipeline and drives it once per frame.
///
/// # Fields
/// - `config`: Scan extents, worker count, and overlay placement
/// - `world`: The host world, shared with scan tasks on worker threads
/// - `scan_state`: Snapshot handoff between workers and the frame thread
/// - `camera`: The smoothed orbit camera and its dirty flag
/// - `renderer`: The cached software rasterizer
/// - `task_manager`: Worker pool running the scans
/// - `enabled`: Master toggle; a disabled minimap does no work at all
/// - `scan_pending`: Guards against re-requesting a scan every frame while
///   one is already in flight
pub struct MinimapState {
    config: MinimapConfig,
    world: Arc<dyn WorldSource>,
    scan_state: Arc<SharedScanState>,
    camera: CameraState,
    renderer: MinimapRenderer,
    task_manager: TaskManager,
    enabled: bool,
    scan_pending: bool,
}

impl MinimapState {
    /// Creates the minimap pipeline over a world.
    ///
    /// Worker threads spin up immediately, but no scan is issued until the
    /// first enabled frame runs.
    pub fn new(config: MinimapConfig, world: Arc<dyn WorldSource>) -> Self {
        let task_manager = TaskManager::new(config.worker_threads);
        let renderer = MinimapRenderer::new(ViewportSize::square(config.overlay_max_size));
        let enabled = config.enabled;

        MinimapState {
            config,
            world,
            scan_state: Arc::new(SharedScanState::new()),
            camera: CameraState::new(),
            renderer,
            task_manager,
            enabled,
            scan_pending: false,
        }
    }

    /// Advances the pipeline by one frame.
    ///
    /// Always pumps the task system so in-flight scans land even while the
    /// minimap is hidden. When enabled, updates the camera, issues the
    /// initial scan if no snapshot exists yet, folds both invalidation
    /// sources into the renderer, and returns the (possibly cached) pixels.
    ///
    /// # Returns
    /// The composited pixels, or `None` while disabled or before the first
    /// snapshot has been published.
    pub fn frame(&mut self, observer: Observer, viewport: ViewportSize) -> Option<&PixelBuffer> {
        self.task_manager.process_completed_tasks();
        self.task_manager.process_queued_tasks();

        if self.scan_state.is_ready() {
            self.scan_pending = false;
        }

        if !self.enabled {
            return None;
        }

        self.camera.update(observer.yaw_degrees);
        if self.camera.take_dirty() {
            self.renderer.invalidate();
        }

        if !self.scan_state.is_ready() {
            // Self-heal: with no snapshot and no scan in flight, issue one.
            // A failed scan clears neither flag, so the next explicit
            // request (or a reset) is what retries it.
            if !self.scan_pending {
                self.request_scan(
                    observer,
                    self.config.horizontal_radius,
                    self.config.vertical_range,
                );
            }
            return None;
        }

        if self.scan_state.is_dirty() {
            self.renderer.invalidate();
            self.scan_state.clear_dirty();
        }

        let snapshot = self.scan_state.current_snapshot()?;
        Some(self.renderer.render(&snapshot, self.camera.camera(), viewport))
    }

    /// Schedules a terrain scan around the observer on the worker pool.
    ///
    /// Hosts may pass extents other than the configured ones (the scanner
    /// clamps them to its supported range). The scan carries a fresh
    /// generation number, so even if it is slow it can never overwrite the
    /// result of a scan requested after it.
    pub fn request_scan(
        &mut self,
        observer: Observer,
        horizontal_radius: u32,
        vertical_range: u32,
    ) {
        let generation = self.scan_state.next_generation();
        let task = TerrainScanTask::new(
            Arc::clone(&self.world),
            Arc::clone(&self.scan_state),
            observer.position,
            horizontal_radius,
            vertical_range,
            generation,
        );

        let scheduled = self.task_manager.publish_task(Box::new(task));
        self.scan_pending = true;
        debug!(
            "Requested terrain scan {} around ({}, {}, {}), scheduled immediately: {}",
            generation, observer.position.x, observer.position.y, observer.position.z, scheduled
        );
    }

    /// Turns the minimap on or off.
    ///
    /// Disabling stops camera tracking and rendering but lets in-flight
    /// scans finish; their snapshots are waiting when re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the minimap is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Discards the current snapshot and returns to the loading state.
    ///
    /// The next enabled frame issues a fresh scan. Scans already in flight
    /// may still land afterward; generation gating keeps them ordered.
    pub fn reset(&mut self) {
        self.scan_state.reset();
        self.scan_pending = false;
        self.renderer.invalidate();
    }

    /// Forces a repaint on the next rendered frame.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    /// Screen placement of the overlay for a given screen size.
    pub fn overlay_rect(&self, screen_width: u32, screen_height: u32) -> config::OverlayRect {
        self.config.overlay_rect(screen_width, screen_height)
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    /// The shared scan state, mainly for tests and diagnostics.
    pub fn scan_state(&self) -> &SharedScanState {
        &self.scan_state
    }

    /// The renderer, mainly for cache diagnostics.
    pub fn renderer(&self) -> &MinimapRenderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::scanning::world_source::WorldAccessError;
    use super::*;

    struct FlatWorld;

    impl WorldSource for FlatWorld {
        fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<String, WorldAccessError> {
            if y <= 0 {
                Ok(String::from("grass_block"))
            } else {
                Ok(String::from("air"))
            }
        }

        fn is_opaque(&self, material_id: &str) -> bool {
            material_id != "air"
        }

        fn top_surface_y(&self, _x: i32, _z: i32) -> Result<i32, WorldAccessError> {
            Ok(0)
        }
    }

    fn test_config() -> MinimapConfig {
        MinimapConfig {
            horizontal_radius: 8,
            vertical_range: 8,
            worker_threads: 1,
            ..MinimapConfig::default()
        }
    }

    #[test]
    fn a_disabled_minimap_does_not_scan_or_render() {
        let mut config = test_config();
        config.enabled = false;
        let mut minimap = MinimapState::new(config, Arc::new(FlatWorld));
        let observer = Observer::new(Point3::new(0, 0, 0), 0.0);

        assert!(minimap.frame(observer, ViewportSize::square(64)).is_none());
        thread::sleep(Duration::from_millis(50));
        assert!(minimap.frame(observer, ViewportSize::square(64)).is_none());
        assert!(
            !minimap.scan_state().is_ready(),
            "no scan should have been issued"
        );
    }

    #[test]
    fn the_loading_state_resolves_into_pixels() {
        let mut minimap = MinimapState::new(test_config(), Arc::new(FlatWorld));
        let observer = Observer::new(Point3::new(0, 0, 0), 0.0);
        let viewport = ViewportSize::square(64);

        assert!(
            minimap.frame(observer, viewport).is_none(),
            "no snapshot exists on the first frame"
        );

        let mut rendered = false;
        for _ in 0..500 {
            if minimap.frame(observer, viewport).is_some() {
                rendered = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(rendered, "the automatic scan should produce a frame");
    }

    #[test]
    fn reset_drops_back_to_loading_and_recovers() {
        let mut minimap = MinimapState::new(test_config(), Arc::new(FlatWorld));
        let observer = Observer::new(Point3::new(0, 0, 0), 0.0);
        let viewport = ViewportSize::square(64);

        for _ in 0..500 {
            if minimap.frame(observer, viewport).is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        minimap.reset();
        assert!(!minimap.scan_state().is_ready());

        let mut recovered = false;
        for _ in 0..500 {
            if minimap.frame(observer, viewport).is_some() {
                recovered = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(recovered, "reset should trigger a fresh scan");
    }

    #[test]
    fn overlay_placement_comes_from_the_config() {
        let minimap = MinimapState::new(test_config(), Arc::new(FlatWorld));
        let rect = minimap.overlay_rect(800, 600);
        assert_eq!(rect.size, 200);
        assert_eq!(rect.x, 592);
        assert_eq!(rect.y, 392);
    }

    #[test]
    fn toggling_enabled_is_observable() {
        let mut minimap = MinimapState::new(test_config(), Arc::new(FlatWorld));
        assert!(minimap.is_enabled());
        minimap.set_enabled(false);
        assert!(!minimap.is_enabled());
        minimap.set_enabled(true);
        assert!(minimap.is_enabled());
    }
}
