#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Minimap
//!
//! A CPU-side isometric minimap pipeline for voxel worlds.
//!
//! This crate scans the terrain around an observer on background threads,
//! condenses it into an immutable snapshot, and software-renders the snapshot
//! into a cached RGBA pixel buffer from a smoothed orbiting camera. The host
//! application supplies world access through a trait and receives pixels it
//! can blit or upload however it likes; no GPU or windowing stack is assumed.
//!
//! ## Key Modules
//!
//! * `minimap_state` - The pipeline coordinator and everything under it:
//!   material classification, terrain scanning, the task system, the orbit
//!   camera, and the software rasterizer
//!
//! ## Architecture
//!
//! The pipeline is split along its thread boundary:
//! * Worker threads run terrain scans and publish snapshots
//! * The frame thread tracks the camera, decides when the cached pixels are
//!   stale, and repaints only then
//! * Snapshots are immutable once published, so no locks are held while
//!   rendering
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cgmath::Point3;
//! use voxel_minimap::minimap_state::camera_state::ViewportSize;
//! use voxel_minimap::minimap_state::config::MinimapConfig;
//! use voxel_minimap::minimap_state::scanning::noise_world::NoiseWorld;
//! use voxel_minimap::minimap_state::{MinimapState, Observer};
//!
//! let world = Arc::new(NoiseWorld::new(42));
//! let mut minimap = MinimapState::new(MinimapConfig::default(), world);
//! let viewport = ViewportSize::square(200);
//!
//! for frame in 0..240 {
//!     let observer = Observer::new(Point3::new(0, 8, 0), frame as f32);
//!     if let Some(pixels) = minimap.frame(observer, viewport) {
//!         // Hand these to the HUD texture.
//!         pixels.as_bytes();
//!     }
//! }
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cgmath::Point3;
use log::{error, info};

use minimap_state::camera_state::ViewportSize;
use minimap_state::config::MinimapConfig;
use minimap_state::scanning::noise_world::NoiseWorld;
use minimap_state::{MinimapState, Observer};

pub mod minimap_state;

/// Seed for the demo world.
const DEMO_SEED: u32 = 42;
/// Nominal screen size used to place the demo overlay.
const DEMO_SCREEN_SIZE: (u32, u32) = (1280, 720);
/// Rendered frames to run before writing the demo image; enough for the
/// camera to settle into its smoothed orbit.
const DEMO_FRAME_COUNT: u32 = 120;
/// Yaw applied per rendered frame, in degrees.
const DEMO_YAW_STEP: f32 = 1.5;
/// Upper bound on demo loop iterations, counting loading frames.
const DEMO_MAX_ITERATIONS: u32 = 4000;
/// Where the demo writes its composited minimap.
const DEMO_OUTPUT_PATH: &str = "minimap.png";

/// Runs the standalone demo: scans a procedurally generated world, orbits the
/// camera around a turning observer, and writes the final minimap to
/// [`DEMO_OUTPUT_PATH`].
///
/// An optional first command-line argument names a JSON config file; missing
/// fields fall back to defaults.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(message) => {
                error!("Could not load config from {path}: {message}");
                return;
            }
        },
        None => MinimapConfig::default(),
    };

    let world = Arc::new(NoiseWorld::new(DEMO_SEED));
    let observer_position = Point3::new(0, world.surface_height(0, 0) + 2, 0);

    let overlay = config.overlay_rect(DEMO_SCREEN_SIZE.0, DEMO_SCREEN_SIZE.1);
    let viewport = ViewportSize::square(overlay.size);
    info!(
        "Demo overlay: {}x{} pixels at ({}, {})",
        overlay.size, overlay.size, overlay.x, overlay.y
    );

    let mut minimap = MinimapState::new(config, world);
    let mut yaw = 0.0_f32;
    let mut rendered_frames = 0;

    for _ in 0..DEMO_MAX_ITERATIONS {
        if rendered_frames >= DEMO_FRAME_COUNT {
            break;
        }

        let observer = Observer::new(observer_position, yaw);
        if minimap.frame(observer, viewport).is_some() {
            rendered_frames += 1;
            yaw += DEMO_YAW_STEP;
        }

        thread::sleep(Duration::from_millis(5));
    }

    if rendered_frames == 0 {
        error!("No frame was rendered; is the scan pool running?");
        return;
    }

    let observer = Observer::new(observer_position, yaw);
    if let Some(pixels) = minimap.frame(observer, viewport) {
        match pixels.to_rgba_image().save(DEMO_OUTPUT_PATH) {
            Ok(()) => info!(
                "Wrote {} after {} rendered frames ({} repaints)",
                DEMO_OUTPUT_PATH,
                rendered_frames,
                minimap.renderer().rebuild_count()
            ),
            Err(image_error) => error!("Could not write {DEMO_OUTPUT_PATH}: {image_error}"),
        }
    }
}

/// Reads and parses a JSON config file.
fn load_config(path: &str) -> Result<MinimapConfig, String> {
    let json = std::fs::read_to_string(path).map_err(|io_error| io_error.to_string())?;
    MinimapConfig::from_json(&json).map_err(|parse_error| parse_error.to_string())
}
