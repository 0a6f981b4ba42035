//! # Face List Builder
//!
//! Turns a scan snapshot into the flat list of projected quads the rasterizer
//! consumes. This is where the depth window trims cave noise out of the map,
//! where grid coordinates become render-space coordinates centered on the
//! observer, and where each face picks up its directional shading.

use cgmath::Point3;

use crate::minimap_state::camera_state::orbit_camera::OrbitCamera;
use crate::minimap_state::camera_state::ViewportSize;
use crate::minimap_state::classification::color::Rgba;
use crate::minimap_state::classification::MaterialKind;
use crate::minimap_state::voxels::face_direction::FaceDirection;
use crate::minimap_state::voxels::snapshot::ScanSnapshot;
use crate::minimap_state::voxels::ScannedVoxel;

/// Voxels farther than this from their column's surface are skipped.
const SURFACE_DISTANCE_LIMIT: u32 = 12;

/// Priority at which a voxel ignores [`SURFACE_DISTANCE_LIMIT`]; deep
/// high-priority features (fluids, landmarks) stay on the map.
const DEEP_FEATURE_PRIORITY: i32 = 70;

/// Faces with any corner beyond this normalized depth sit outside the view
/// volume and are dropped whole.
const FAR_CLIP_DEPTH: f32 = 1.0;

/// A single quad face projected into viewport space, ready to rasterize.
///
/// Corners are kept in perimeter order so the scanline fill can walk the
/// quad's edges directly.
pub struct ProjectedFace {
    /// Pixel-space x coordinate of each corner, in perimeter order
    pub screen_xs: [f32; 4],
    /// Pixel-space y coordinate of each corner, in perimeter order
    pub screen_ys: [f32; 4],
    /// Mean normalized depth of the four corners, used for painter ordering
    pub average_depth: f32,
    /// Fill color, already shaded for the face's direction
    pub color: Rgba,
    /// Material priority, the primary painter ordering key
    pub priority: i32,
}

/// Projects every visible face in the snapshot into viewport space.
///
/// Air voxels and voxels outside the depth window contribute nothing. Faces
/// that fail projection or reach past the clip volume are dropped whole
/// rather than clipped geometrically; at minimap scale a missing border face
/// is invisible, a half-clipped one is not.
pub fn build_faces(
    snapshot: &ScanSnapshot,
    camera: &OrbitCamera,
    viewport: ViewportSize,
) -> Vec<ProjectedFace> {
    let hr = snapshot.horizontal_radius() as i32;
    let vr = snapshot.vertical_range() as i32;

    let mut faces = Vec::new();
    for voxel in snapshot.grid().iter() {
        if voxel.info.kind == MaterialKind::AIR || voxel.visible_faces.is_empty() {
            continue;
        }
        if voxel.surface_distance > SURFACE_DISTANCE_LIMIT
            && voxel.info.priority < DEEP_FEATURE_PRIORITY
        {
            continue;
        }

        // Recenter the grid on the window's middle and flip Y so columns grow
        // upward in render space.
        let base = Point3::new(
            (voxel.grid_pos.x - hr) as f32,
            (vr / 2 - voxel.grid_pos.y) as f32,
            (voxel.grid_pos.z - hr) as f32,
        );

        for direction in FaceDirection::all() {
            if !voxel.visible_faces.contains(direction) {
                continue;
            }
            if let Some(face) = project_face(voxel, base, direction, camera, viewport) {
                faces.push(face);
            }
        }
    }

    faces
}

/// Projects one face of a voxel, or `None` if it leaves the view volume.
fn project_face(
    voxel: &ScannedVoxel,
    base: Point3<f32>,
    direction: FaceDirection,
    camera: &OrbitCamera,
    viewport: ViewportSize,
) -> Option<ProjectedFace> {
    let corners = direction.corners(base);
    let mut screen_xs = [0.0f32; 4];
    let mut screen_ys = [0.0f32; 4];
    let mut depth_sum = 0.0f32;

    for (i, corner) in corners.iter().enumerate() {
        let projected = camera.projected_point(*corner, viewport)?;
        if projected.depth.abs() > FAR_CLIP_DEPTH {
            return None;
        }
        screen_xs[i] = projected.x;
        screen_ys[i] = projected.y;
        depth_sum += projected.depth;
    }

    Some(ProjectedFace {
        screen_xs,
        screen_ys,
        average_depth: depth_sum / 4.0,
        color: voxel.info.base_color.adjust_brightness(direction.brightness()),
        priority: voxel.info.priority,
    })
}
