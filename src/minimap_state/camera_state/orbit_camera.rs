//! # Orbit Camera Implementation
//!
//! The minimap camera orbits the scan window's center at a fixed distance and
//! pitch, chasing the observer's facing yaw with smoothing. It combines a
//! right-handed look-at view with an orthographic projection, which keeps the
//! isometric look stable no matter how fast the observer turns.

use cgmath::{ortho, Angle, Deg, Matrix4, Point3, Vector3};

use super::ViewportSize;

/// Distance from the orbit center to the camera eye, in voxels.
const CAMERA_DISTANCE: f32 = 24.0;
/// Height of the camera eye above the orbit center, in voxels.
const CAMERA_HEIGHT: f32 = 16.0;
/// Fixed downward pitch of the orbit, in degrees.
const CAMERA_PITCH_DEGREES: f32 = -45.0;
/// Height of the look-at target above the scan window's center.
const LOOK_TARGET_HEIGHT: f32 = 4.0;
/// Half-extent of the orthographic view volume, in voxels.
const ORTHO_HALF_EXTENT: f32 = 20.0;
/// Near clip plane distance.
const NEAR_PLANE: f32 = 1.0;
/// Far clip plane distance.
const FAR_PLANE: f32 = 100.0;
/// Yaw differences at or below this many degrees are ignored.
const YAW_DEAD_ZONE_DEGREES: f32 = 1.0;
/// Fraction of the remaining yaw difference applied per update.
const YAW_SMOOTHING_FACTOR: f32 = 0.15;
/// Homogeneous w values below this magnitude are treated as degenerate.
const W_EPSILON: f32 = 1e-6;

/// A 3D point after projection to the viewport.
///
/// # Fields
/// - `x`, `y`: Pixel-space coordinates, origin at the top-left of the viewport
/// - `depth`: Normalized device depth in [-1, 1]; values outside that range
///   are beyond the clip planes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// Pixel-space x, origin at the left edge
    pub x: f32,
    /// Pixel-space y, origin at the top edge
    pub y: f32,
    /// Normalized device depth in [-1, 1]
    pub depth: f32,
}

/// The smoothed orbiting camera that views the scan window.
///
/// The camera holds only its tracked yaw and the view-projection matrix
/// derived from it; distance, height, pitch, and the projection volume are
/// fixed. The matrix is rebuilt eagerly whenever the yaw moves outside the
/// dead zone.
#[derive(Debug)]
pub struct OrbitCamera {
    /// Tracked yaw in degrees, wrapped to [-180, 180)
    current_yaw: f32,
    /// Cached combined view-projection matrix
    view_projection: Matrix4<f32>,
}

impl OrbitCamera {
    /// Creates a camera with its yaw at 0 degrees.
    pub fn new() -> Self {
        OrbitCamera {
            current_yaw: 0.0,
            view_projection: Self::calc_view_projection(0.0),
        }
    }

    /// Advances the tracked yaw toward the observer's yaw.
    ///
    /// The shortest-path angular difference is computed first; if its
    /// magnitude is inside the dead zone nothing changes. Otherwise the
    /// tracked yaw moves a fixed fraction of the difference and the
    /// view-projection matrix is rebuilt.
    ///
    /// # Arguments
    /// * `observer_yaw` - The observer's facing yaw in degrees
    ///
    /// # Returns
    /// `true` if the matrix changed and any cached image of the scene is now
    /// stale, `false` if the yaw stayed within the dead zone.
    pub fn update(&mut self, observer_yaw: f32) -> bool {
        let target = wrap_degrees(observer_yaw);
        let diff = wrap_degrees(target - self.current_yaw);
        if diff.abs() <= YAW_DEAD_ZONE_DEGREES {
            return false;
        }

        self.current_yaw = wrap_degrees(self.current_yaw + diff * YAW_SMOOTHING_FACTOR);
        self.view_projection = Self::calc_view_projection(self.current_yaw);
        true
    }

    /// The tracked yaw in degrees, wrapped to [-180, 180).
    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    /// The combined view-projection matrix for the current yaw.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.view_projection
    }

    /// Projects a world-space point into viewport pixel space.
    ///
    /// The point is transformed by the view-projection matrix and
    /// perspective-divided, then mapped from NDC [-1, 1] into pixel
    /// coordinates with Y flipped so the origin sits at the top-left.
    ///
    /// # Arguments
    /// * `world` - The point in scan-window world space
    /// * `viewport` - The target viewport dimensions
    ///
    /// # Returns
    /// The projected point, or `None` if the homogeneous divide is degenerate.
    /// Depth is left in NDC so callers can reject points beyond the clip range.
    pub fn projected_point(
        &self,
        world: Point3<f32>,
        viewport: ViewportSize,
    ) -> Option<ProjectedPoint> {
        let clip = self.view_projection * world.to_homogeneous();
        if clip.w.abs() < W_EPSILON {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let ndc_z = clip.z / clip.w;

        Some(ProjectedPoint {
            x: (ndc_x * 0.5 + 0.5) * viewport.width as f32,
            y: (1.0 - (ndc_y * 0.5 + 0.5)) * viewport.height as f32,
            depth: ndc_z,
        })
    }

    /// Rebuilds the combined matrix for a yaw.
    ///
    /// The eye orbits the look target: its horizontal offset is the orbit
    /// distance foreshortened by the fixed pitch, rotated by the yaw, and its
    /// height is constant.
    fn calc_view_projection(yaw_degrees: f32) -> Matrix4<f32> {
        let yaw = Deg(yaw_degrees);
        let pitch = Deg(CAMERA_PITCH_DEGREES);

        let orbit_reach = CAMERA_DISTANCE * pitch.cos();
        let eye = Point3::new(
            yaw.sin() * orbit_reach,
            CAMERA_HEIGHT,
            yaw.cos() * orbit_reach,
        );
        let target = Point3::new(0.0, LOOK_TARGET_HEIGHT, 0.0);

        let view = Matrix4::look_at_rh(eye, target, Vector3::unit_y());
        let projection = ortho(
            -ORTHO_HALF_EXTENT,
            ORTHO_HALF_EXTENT,
            -ORTHO_HALF_EXTENT,
            ORTHO_HALF_EXTENT,
            NEAR_PLANE,
            FAR_PLANE,
        );

        projection * view
    }
}

/// Wraps an angle in degrees to the range [-180, 180).
fn wrap_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped >= 180.0 {
        wrapped -= 360.0;
    }
    if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
