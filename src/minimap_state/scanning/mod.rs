//! # Terrain Scanning Module
//!
//! This module walks a bounded 3D neighborhood around the observer and turns
//! it into an immutable [`ScanSnapshot`]. Scanning decides three things per
//! voxel: whether the voxel belongs in the snapshot at all (surface fidelity
//! versus cave suppression), how far it sits from its column's surface, and
//! which of its six faces are worth drawing.
//!
//! Scans are expensive and run on worker threads via the task system; the
//! frame thread only ever sees the finished snapshot through
//! [`scan_state::SharedScanState`].

use cgmath::Point3;

use super::classification::{classify, MaterialInfo, MaterialKind};
use super::voxels::face_direction::FaceDirection;
use super::voxels::snapshot::{ScanSnapshot, VoxelGrid};
use super::voxels::{FaceMask, ScannedVoxel};
use world_source::{WorldAccessError, WorldSource};

pub mod noise_world;
pub mod scan_state;
pub mod tasks;
pub mod world_source;

/// Smallest accepted horizontal radius / vertical range, in voxels.
pub const MIN_SCAN_EXTENT: u32 = 8;
/// Largest accepted horizontal radius / vertical range, in voxels.
pub const MAX_SCAN_EXTENT: u32 = 32;

/// How far above the observer each column's downward surface probe starts.
/// The margin keeps overhangs just above eye level inside the window.
const SURFACE_PROBE_MARGIN: i32 = 5;

/// Air deeper than this below the local surface is never included.
const MAX_AIR_INCLUSION_DEPTH: i32 = 8;

/// Air at most this deep may still be included if a short upward probe
/// reaches open sky.
const SHALLOW_RECESS_DEPTH: i32 = 3;

/// A face is visible when neighbor priorities differ by more than this.
const PRIORITY_VISIBILITY_GAP: i32 = 10;

/// A face is visible when neighbor colors differ by more than this
/// (Manhattan distance over RGB).
const COLOR_VISIBILITY_GAP: u32 = 50;

/// Scans the neighborhood around `observer_pos` into a snapshot.
///
/// Extents outside [`MIN_SCAN_EXTENT`, `MAX_SCAN_EXTENT`] are silently
/// clamped. The scan window spans `2 * horizontal_radius + 1` columns on each
/// horizontal axis and `vertical_range` voxels per column, starting
/// [`SURFACE_PROBE_MARGIN`] above the observer and probing downward.
///
/// # Arguments
/// * `world` - The world to sample; must tolerate queries one voxel beyond
///   the window (neighbor visibility probes)
/// * `observer_pos` - The voxel position the scan is centered on
/// * `horizontal_radius` - Requested horizontal radius, clamped before use
/// * `vertical_range` - Requested column height, clamped before use
///
/// # Returns
/// The completed snapshot, or the first world access error encountered. On
/// error the scan is abandoned whole; no partial snapshot escapes.
pub fn scan(
    world: &dyn WorldSource,
    observer_pos: Point3<i32>,
    horizontal_radius: u32,
    vertical_range: u32,
) -> Result<ScanSnapshot, WorldAccessError> {
    let hr = horizontal_radius.clamp(MIN_SCAN_EXTENT, MAX_SCAN_EXTENT) as i32;
    let vr = vertical_range.clamp(MIN_SCAN_EXTENT, MAX_SCAN_EXTENT) as i32;
    let size = (2 * hr + 1) as usize;
    let y_start = observer_pos.y + SURFACE_PROBE_MARGIN;

    let mut grid = VoxelGrid::new(size, vr as usize, size);

    for ux in 0..size {
        let world_x = observer_pos.x - hr + ux as i32;
        for uz in 0..size {
            let world_z = observer_pos.z - hr + uz as i32;
            scan_column(world, &mut grid, world_x, world_z, y_start, vr, ux, uz)?;
        }
    }

    Ok(ScanSnapshot::new(observer_pos, hr as u32, vr as u32, grid))
}

/// Scans one vertical column into the grid.
///
/// The column is sampled once top-down, its surface located, and then each
/// voxel is either retained (with its visibility mask) or dropped by the
/// air-inclusion heuristic.
#[allow(clippy::too_many_arguments)]
fn scan_column(
    world: &dyn WorldSource,
    grid: &mut VoxelGrid,
    world_x: i32,
    world_z: i32,
    y_start: i32,
    vertical_range: i32,
    ux: usize,
    uz: usize,
) -> Result<(), WorldAccessError> {
    let mut column = Vec::with_capacity(vertical_range as usize);
    for step in 0..vertical_range {
        let world_y = y_start - step;
        let material_id = world.block_at(world_x, world_y, world_z)?;
        let info = classify(&material_id);
        column.push((material_id, info));
    }

    // The local surface is the first non-air, non-fluid voxel from the top.
    // Columns with no such voxel get a sentinel just below the window, which
    // makes every air voxel in them "above the surface".
    let mut surface_y = y_start - vertical_range;
    for (step, (_, info)) in column.iter().enumerate() {
        if info.kind != MaterialKind::AIR && !info.is_fluid {
            surface_y = y_start - step as i32;
            break;
        }
    }

    for (step, (material_id, info)) in column.into_iter().enumerate() {
        let world_y = y_start - step as i32;
        let depth_below_surface = surface_y - world_y;

        let visible_faces = if info.kind == MaterialKind::AIR {
            if !include_air_voxel(world, world_x, world_y, world_z, depth_below_surface)? {
                continue;
            }
            // Air carries no drawable faces; it is retained only so the
            // snapshot records which open positions the scan considered part
            // of the surface.
            FaceMask::EMPTY
        } else {
            let mut mask = FaceMask::EMPTY;
            for direction in FaceDirection::all() {
                let offset = direction.offset();
                let neighbor_id = world.block_at(
                    world_x + offset.x,
                    world_y + offset.y,
                    world_z + offset.z,
                )?;
                let neighbor = classify(&neighbor_id);
                if face_visible_against(&info, &neighbor, direction) {
                    mask.set(direction);
                }
            }
            mask
        };

        grid.set(
            ux,
            step,
            uz,
            ScannedVoxel {
                material_id,
                grid_pos: Point3::new(ux as i32, step as i32, uz as i32),
                visible_faces,
                info,
                surface_distance: depth_below_surface.unsigned_abs(),
            },
        );
    }

    Ok(())
}

/// Decides whether an air voxel belongs in the snapshot.
///
/// Air within a shallow band below the surface is kept when a short upward
/// probe reaches open sky, which preserves overhangs and recesses while
/// keeping enclosed caverns out of the map. Air deeper than
/// [`MAX_AIR_INCLUSION_DEPTH`] is always excluded, sky or not.
fn include_air_voxel(
    world: &dyn WorldSource,
    x: i32,
    y: i32,
    z: i32,
    depth_below_surface: i32,
) -> Result<bool, WorldAccessError> {
    if depth_below_surface > MAX_AIR_INCLUSION_DEPTH {
        return Ok(false);
    }
    if depth_below_surface <= 0 {
        return world.is_sky_visible(x, y, z);
    }
    if depth_below_surface <= SHALLOW_RECESS_DEPTH {
        for dy in 1..=(depth_below_surface + 2) {
            if world.is_sky_visible(x, y + dy, z)? {
                return Ok(true);
            }
        }
        return Ok(false);
    }
    Ok(false)
}

/// The per-face visibility rule.
///
/// Evaluated per-voxel against the neighbor's classification, never
/// negotiated between the two voxels: each side of a shared face decides for
/// itself, and the compositor resolves any disagreement by depth. A face is
/// visible when any of the following holds, tested in order:
/// 1. The neighbor is air.
/// 2. The face is the top face (always shown for silhouette clarity).
/// 3. The neighbor's kind differs.
/// 4. The priorities differ by more than [`PRIORITY_VISIBILITY_GAP`].
/// 5. This material is transparent and the neighbor is not.
/// 6. This material is a fluid and the neighbor is not.
/// 7. The colors differ by more than [`COLOR_VISIBILITY_GAP`].
fn face_visible_against(
    own: &MaterialInfo,
    neighbor: &MaterialInfo,
    direction: FaceDirection,
) -> bool {
    if neighbor.kind == MaterialKind::AIR {
        return true;
    }
    if direction == FaceDirection::UP {
        return true;
    }
    if neighbor.kind != own.kind {
        return true;
    }
    if (neighbor.priority - own.priority).abs() > PRIORITY_VISIBILITY_GAP {
        return true;
    }
    if own.is_transparent && !neighbor.is_transparent {
        return true;
    }
    if own.is_fluid && !neighbor.is_fluid {
        return true;
    }
    own.base_color.manhattan_distance(neighbor.base_color) > COLOR_VISIBILITY_GAP
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Flat terrain with per-position overrides and an optional forced
    /// sky-visibility answer.
    struct FixtureWorld {
        ground_material: &'static str,
        ground_y: i32,
        overrides: HashMap<(i32, i32, i32), &'static str>,
        sky_override: Option<bool>,
    }

    impl FixtureWorld {
        fn flat(ground_material: &'static str, ground_y: i32) -> Self {
            FixtureWorld {
                ground_material,
                ground_y,
                overrides: HashMap::new(),
                sky_override: None,
            }
        }

        fn with_block(mut self, x: i32, y: i32, z: i32, material: &'static str) -> Self {
            self.overrides.insert((x, y, z), material);
            self
        }

        fn with_sky_override(mut self, visible: bool) -> Self {
            self.sky_override = Some(visible);
            self
        }
    }

    impl WorldSource for FixtureWorld {
        fn block_at(&self, x: i32, y: i32, z: i32) -> Result<String, WorldAccessError> {
            if let Some(material) = self.overrides.get(&(x, y, z)) {
                return Ok(String::from(*material));
            }
            if y <= self.ground_y {
                Ok(String::from(self.ground_material))
            } else {
                Ok(String::from("air"))
            }
        }

        fn is_opaque(&self, material_id: &str) -> bool {
            let info = classify(material_id);
            info.kind != MaterialKind::AIR && !info.is_transparent
        }

        fn top_surface_y(&self, x: i32, z: i32) -> Result<i32, WorldAccessError> {
            let override_top = self
                .overrides
                .iter()
                .filter(|((ox, _, oz), material)| *ox == x && *oz == z && **material != "air")
                .map(|((_, oy, _), _)| *oy)
                .max();
            Ok(override_top.unwrap_or(self.ground_y).max(self.ground_y))
        }

        fn is_sky_visible(&self, x: i32, y: i32, z: i32) -> Result<bool, WorldAccessError> {
            if let Some(forced) = self.sky_override {
                return Ok(forced);
            }
            let top = self.top_surface_y(x, z)?;
            if y >= top {
                return Ok(true);
            }
            for probe_y in (y + 1)..=top {
                if self.is_opaque(&self.block_at(x, probe_y, z)?) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }

    /// Fails every block query, for exercising the abandon-on-error path.
    struct BrokenWorld;

    impl WorldSource for BrokenWorld {
        fn block_at(&self, _x: i32, _y: i32, _z: i32) -> Result<String, WorldAccessError> {
            Err(WorldAccessError::Unavailable(String::from(
                "fixture failure",
            )))
        }

        fn is_opaque(&self, _material_id: &str) -> bool {
            false
        }

        fn top_surface_y(&self, _x: i32, _z: i32) -> Result<i32, WorldAccessError> {
            Err(WorldAccessError::Unavailable(String::from(
                "fixture failure",
            )))
        }
    }

    #[test]
    fn extents_clamp_to_the_supported_range() {
        let world = FixtureWorld::flat("grass_block", 0);
        let observer = Point3::new(0, 0, 0);

        let oversized = scan(&world, observer, 200, 200).unwrap();
        let at_max = scan(&world, observer, 32, 32).unwrap();
        assert_eq!(oversized.horizontal_radius(), at_max.horizontal_radius());
        assert_eq!(oversized.vertical_range(), at_max.vertical_range());
        assert_eq!(oversized.voxel_count(), at_max.voxel_count());

        let undersized = scan(&world, observer, 1, 1).unwrap();
        let at_min = scan(&world, observer, 8, 8).unwrap();
        assert_eq!(undersized.horizontal_radius(), at_min.horizontal_radius());
        assert_eq!(undersized.vertical_range(), at_min.vertical_range());
        assert_eq!(undersized.voxel_count(), at_min.voxel_count());
    }

    #[test]
    fn deep_air_is_excluded_even_with_open_sky() {
        // Stone surface at y=10 with air pockets at depth 9 and depth 3, and
        // sky visibility forced true so only the depth rules decide.
        let world = FixtureWorld::flat("stone", 10)
            .with_block(0, 1, 0, "air")
            .with_block(0, 7, 0, "air")
            .with_sky_override(true);

        let snapshot = scan(&world, Point3::new(0, 8, 0), 8, 16).unwrap();
        let grid = snapshot.grid();

        // y_start = 13, so world y maps to grid y = 13 - y; the observer
        // column sits at the window center (8, 8).
        let shallow = grid.get(8, 6, 8).expect("depth-3 air should be retained");
        assert_eq!(shallow.info.kind, MaterialKind::AIR);
        assert_eq!(shallow.surface_distance, 3);

        assert!(grid.get(8, 12, 8).is_none(), "depth-9 air must be excluded");
    }

    #[test]
    fn air_above_the_surface_is_retained_when_sky_is_visible() {
        let world = FixtureWorld::flat("grass_block", 0);
        let snapshot = scan(&world, Point3::new(0, 0, 0), 8, 8).unwrap();

        let above = snapshot.grid().get(8, 0, 8).expect("open air at the top");
        assert_eq!(above.info.kind, MaterialKind::AIR);
        assert!(above.visible_faces.is_empty());
    }

    #[test]
    fn surface_detection_skips_fluids() {
        // Water from y=6 up to y=10 over a sand bed at y=5.
        let mut world = FixtureWorld::flat("sand", 5);
        for y in 6..=10 {
            world = world.with_block(0, y, 0, "water");
        }

        let snapshot = scan(&world, Point3::new(0, 8, 0), 8, 16).unwrap();
        let grid = snapshot.grid();
        let y_start = 8 + 5;

        let bed = grid.get(8, (y_start - 5) as usize, 8).expect("sand bed");
        assert_eq!(bed.info.kind, MaterialKind::SAND);
        assert_eq!(bed.surface_distance, 0, "the sand bed is the surface");

        let water = grid.get(8, (y_start - 8) as usize, 8).expect("water");
        assert_eq!(water.info.kind, MaterialKind::WATER);
        assert_eq!(water.surface_distance, 3, "water counts up from the bed");
    }

    #[test]
    fn buried_voxels_still_show_their_top_face() {
        let world = FixtureWorld::flat("dirt", 0);
        let snapshot = scan(&world, Point3::new(0, 0, 0), 8, 8).unwrap();

        // One voxel below the surface: dirt surrounded by dirt on all sides
        // except above (also dirt). Only the always-on top face survives.
        let buried = snapshot.grid().get(8, 6, 8).expect("buried dirt");
        assert_eq!(buried.surface_distance, 1);
        assert!(buried.visible_faces.contains(FaceDirection::UP));
        assert!(!buried.visible_faces.contains(FaceDirection::NORTH));
        assert!(!buried.visible_faces.contains(FaceDirection::DOWN));
        assert_eq!(buried.visible_faces.count(), 1);
    }

    #[test]
    fn scan_abandons_on_world_error() {
        let result = scan(&BrokenWorld, Point3::new(0, 0, 0), 8, 8);
        assert!(result.is_err());
    }

    #[test]
    fn priority_gap_is_evaluated_per_voxel() {
        // Same kind, similar color, both opaque; only the priorities differ.
        let high = MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 100);
        let low = MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 30);

        // Each voxel runs the rule independently; for a pure priority gap
        // both happen to claim a face toward the other.
        assert!(face_visible_against(&high, &low, FaceDirection::NORTH));
        assert!(face_visible_against(&low, &high, FaceDirection::NORTH));

        // Within the gap threshold nothing shows.
        let near = MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 95);
        assert!(!face_visible_against(&high, &near, FaceDirection::NORTH));
    }

    #[test]
    fn transparency_rule_is_asymmetric() {
        let glassy = MaterialInfo::new(0xFF808080, MaterialKind::SPECIAL, true, false, 85);
        let solid = MaterialInfo::new(0xFF808080, MaterialKind::SPECIAL, false, false, 85);

        // The transparent voxel draws its boundary; the solid one does not.
        assert!(face_visible_against(&glassy, &solid, FaceDirection::WEST));
        assert!(!face_visible_against(&solid, &glassy, FaceDirection::WEST));
    }

    #[test]
    fn fluid_rule_is_asymmetric() {
        let flowing = MaterialInfo::new(0xFF4040FF, MaterialKind::WATER, true, true, 90);
        let frozen = MaterialInfo::new(0xFF4040FF, MaterialKind::WATER, true, false, 90);

        assert!(face_visible_against(&flowing, &frozen, FaceDirection::EAST));
        assert!(!face_visible_against(&frozen, &flowing, FaceDirection::EAST));
    }

    #[test]
    fn similar_stone_variants_share_hidden_faces() {
        // Stone vs cobblestone: same kind and band, Manhattan distance 48,
        // just inside the color threshold.
        let stone = classify("stone");
        let cobble = classify("cobblestone");
        assert!(!face_visible_against(&stone, &cobble, FaceDirection::SOUTH));

        // Stone vs diorite contrasts strongly enough to show.
        let diorite = classify("diorite");
        assert!(face_visible_against(&stone, &diorite, FaceDirection::SOUTH));
    }
}
