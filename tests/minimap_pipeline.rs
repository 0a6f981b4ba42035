//! End-to-end tests that drive the full pipeline through its public surface:
//! a world source in, RGBA pixels out. Everything here runs the real worker
//! pool, so tests poll the frame call the way a host render loop would.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cgmath::Point3;

use voxel_minimap::minimap_state::camera_state::orbit_camera::OrbitCamera;
use voxel_minimap::minimap_state::camera_state::ViewportSize;
use voxel_minimap::minimap_state::classification::classify;
use voxel_minimap::minimap_state::classification::color::Rgba;
use voxel_minimap::minimap_state::config::MinimapConfig;
use voxel_minimap::minimap_state::rendering::MinimapRenderer;
use voxel_minimap::minimap_state::scanning::noise_world::NoiseWorld;
use voxel_minimap::minimap_state::scanning::world_source::{WorldAccessError, WorldSource};
use voxel_minimap::minimap_state::voxels::face_direction::FaceDirection;
use voxel_minimap::minimap_state::voxels::snapshot::{ScanSnapshot, VoxelGrid};
use voxel_minimap::minimap_state::voxels::{FaceMask, ScannedVoxel};
use voxel_minimap::minimap_state::{MinimapState, Observer};

/// An endless grass plain: grass at y 0, dirt below it, stone underneath.
struct FlatWorld;

impl WorldSource for FlatWorld {
    fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<String, WorldAccessError> {
        let material = match y {
            0 => "grass_block",
            -3..=-1 => "dirt",
            y if y < -3 => "stone",
            _ => "air",
        };
        Ok(String::from(material))
    }

    fn is_opaque(&self, material_id: &str) -> bool {
        material_id != "air"
    }

    fn top_surface_y(&self, _x: i32, _z: i32) -> Result<i32, WorldAccessError> {
        Ok(0)
    }
}

fn small_config() -> MinimapConfig {
    MinimapConfig {
        horizontal_radius: 8,
        vertical_range: 8,
        worker_threads: 1,
        ..MinimapConfig::default()
    }
}

/// Polls `frame` until the first scan lands, then returns a copy of the
/// rendered bytes. Panics if nothing renders within the deadline.
fn wait_for_pixels(
    minimap: &mut MinimapState,
    observer: Observer,
    viewport: ViewportSize,
) -> Vec<u8> {
    for _ in 0..500 {
        if minimap.frame(observer, viewport).is_some() {
            return minimap
                .frame(observer, viewport)
                .map(|pixels| pixels.as_bytes().to_vec())
                .unwrap_or_default();
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("the minimap never produced pixels");
}

#[test]
fn a_flat_world_renders_grass_tops() {
    let observer = Observer::new(Point3::new(0, 2, 0), 0.0);
    let viewport = ViewportSize::square(64);
    let mut minimap = MinimapState::new(small_config(), Arc::new(FlatWorld));

    let bytes = wait_for_pixels(&mut minimap, observer, viewport);

    // Grass tops keep the base color: full brightness on upward faces.
    let grass_top = [127, 178, 56, 255];
    let grass_pixels = bytes
        .chunks_exact(4)
        .filter(|pixel| *pixel == grass_top)
        .count();
    assert!(
        grass_pixels >= 100,
        "expected a grass diamond, found {grass_pixels} matching pixels"
    );

    // The projected window is a diamond well inside the viewport, so the
    // corners stay untouched.
    let corner = &bytes[..4];
    assert_eq!(corner, [0, 0, 0, 0]);
}

#[test]
fn matching_seeds_produce_matching_pixels() {
    let world_a = Arc::new(NoiseWorld::new(7));
    let world_b = Arc::new(NoiseWorld::new(7));
    let observer = Observer::new(Point3::new(0, world_a.surface_height(0, 0) + 2, 0), 0.0);
    let viewport = ViewportSize::square(96);

    let mut minimap_a = MinimapState::new(small_config(), world_a);
    let mut minimap_b = MinimapState::new(small_config(), world_b);

    let bytes_a = wait_for_pixels(&mut minimap_a, observer, viewport);
    let bytes_b = wait_for_pixels(&mut minimap_b, observer, viewport);

    assert!(!bytes_a.is_empty());
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn the_scan_window_clamps_to_its_limits() {
    let config = MinimapConfig {
        horizontal_radius: 100,
        vertical_range: 2,
        worker_threads: 1,
        ..MinimapConfig::default()
    };
    let observer = Observer::new(Point3::new(0, 2, 0), 0.0);
    let mut minimap = MinimapState::new(config, Arc::new(FlatWorld));

    wait_for_pixels(&mut minimap, observer, ViewportSize::square(64));

    let snapshot = minimap
        .scan_state()
        .current_snapshot()
        .unwrap_or_else(|| panic!("a rendered frame implies a published snapshot"));
    assert_eq!(snapshot.horizontal_radius(), 32);
    assert_eq!(snapshot.vertical_range(), 8);
}

#[test]
fn turning_the_observer_repaints_until_the_camera_settles() {
    let position = Point3::new(0, 2, 0);
    let viewport = ViewportSize::square(64);
    let mut minimap = MinimapState::new(small_config(), Arc::new(FlatWorld));

    wait_for_pixels(&mut minimap, Observer::new(position, 0.0), viewport);
    assert_eq!(minimap.renderer().rebuild_count(), 1);

    // The smoothed yaw chases the new heading a fraction per frame, then
    // stops inside the dead zone; repaints must stop with it.
    let turned = Observer::new(position, 90.0);
    for _ in 0..200 {
        minimap.frame(turned, viewport);
    }
    let settled_count = minimap.renderer().rebuild_count();
    assert!(settled_count > 1);

    for _ in 0..3 {
        minimap.frame(turned, viewport);
    }
    assert_eq!(minimap.renderer().rebuild_count(), settled_count);
}

#[test]
fn a_handmade_snapshot_paints_where_the_camera_says() {
    let mut top_only = FaceMask::EMPTY;
    top_only.set(FaceDirection::UP);

    // A 3x3 grass patch, one voxel tall, centered on the window.
    let mut grid = VoxelGrid::new(3, 1, 3);
    for x in 0..3 {
        for z in 0..3 {
            grid.set(
                x,
                0,
                z,
                ScannedVoxel {
                    material_id: String::from("grass_block"),
                    grid_pos: Point3::new(x as i32, 0, z as i32),
                    visible_faces: top_only,
                    info: classify("grass_block"),
                    surface_distance: 0,
                },
            );
        }
    }
    let snapshot = ScanSnapshot::new(Point3::new(0, 0, 0), 1, 1, grid);

    let camera = OrbitCamera::new();
    let viewport = ViewportSize::square(200);
    let mut renderer = MinimapRenderer::new(viewport);
    let pixels = renderer.render(&snapshot, &camera, viewport);

    // The center voxel's top face center must land on a grass pixel.
    let top_center = camera
        .projected_point(Point3::new(0.5, 1.0, 0.5), viewport)
        .unwrap_or_else(|| panic!("the patch center projects inside the viewport"));
    let pixel = pixels
        .get(top_center.x.round() as u32, top_center.y.round() as u32)
        .unwrap_or_else(|| panic!("the projected center is a valid pixel"));
    assert_eq!(pixel, Rgba::new(127, 178, 56, 255));

    // Far from the patch nothing is painted.
    assert_eq!(pixels.get(5, 5), Some(Rgba::TRANSPARENT));
}
