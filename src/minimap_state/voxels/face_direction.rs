//! # Face Direction Module
//!
//! This module defines the six axis-aligned faces of a voxel, their neighbor
//! offsets, their corner geometry, and the directional brightness each face
//! receives from the fixed overhead light.

use cgmath::{Point3, Vector3};
use num_derive::FromPrimitive;

/// The six faces of a voxel.
///
/// Each variant is assigned the bit index it occupies inside a
/// [`FaceMask`](super::FaceMask), so the enum value doubles as the mask layout.
/// The order is: [DOWN, UP, NORTH, SOUTH, WEST, EAST].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum FaceDirection {
    /// The bottom face (facing negative Y)
    DOWN = 0,

    /// The top face (facing positive Y)
    UP = 1,

    /// The north face (facing negative Z)
    NORTH = 2,

    /// The south face (facing positive Z)
    SOUTH = 3,

    /// The west face (facing negative X)
    WEST = 4,

    /// The east face (facing positive X)
    EAST = 5,
}

impl FaceDirection {
    /// Returns all six directions in mask-bit order.
    ///
    /// The order is: [DOWN, UP, NORTH, SOUTH, WEST, EAST]
    pub fn all() -> [FaceDirection; 6] {
        [
            FaceDirection::DOWN,
            FaceDirection::UP,
            FaceDirection::NORTH,
            FaceDirection::SOUTH,
            FaceDirection::WEST,
            FaceDirection::EAST,
        ]
    }

    /// Converts a mask bit index back into a direction.
    ///
    /// # Arguments
    /// * `index` - The bit index, 0 through 5
    ///
    /// # Returns
    /// The corresponding direction, or `None` if the index is out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        num::FromPrimitive::from_u8(index)
    }

    /// Returns the integer offset to the neighboring voxel across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            FaceDirection::DOWN => Vector3::new(0, -1, 0),
            FaceDirection::UP => Vector3::new(0, 1, 0),
            FaceDirection::NORTH => Vector3::new(0, 0, -1),
            FaceDirection::SOUTH => Vector3::new(0, 0, 1),
            FaceDirection::WEST => Vector3::new(-1, 0, 0),
            FaceDirection::EAST => Vector3::new(1, 0, 0),
        }
    }

    /// Returns the directional brightness factor for this face.
    ///
    /// Approximates a fixed overhead light: tops are fully lit, bottoms are
    /// darkest, and the four sides fall in between so adjacent faces of a
    /// voxel stay distinguishable after projection.
    pub fn brightness(self) -> f32 {
        match self {
            FaceDirection::DOWN => 0.5,
            FaceDirection::UP => 1.0,
            FaceDirection::NORTH | FaceDirection::SOUTH => 0.8,
            FaceDirection::WEST | FaceDirection::EAST => 0.6,
        }
    }

    /// Returns the four corners of this face of a unit cube anchored at `base`.
    ///
    /// Corners are listed in perimeter order so the quad's edges can be walked
    /// pairwise during scanline rasterization.
    ///
    /// # Arguments
    /// * `base` - The minimum-corner position of the voxel's unit cube
    ///
    /// # Returns
    /// The face's four corner points in world units.
    pub fn corners(self, base: Point3<f32>) -> [Point3<f32>; 4] {
        let (x, y, z) = (base.x, base.y, base.z);
        match self {
            FaceDirection::DOWN => [
                Point3::new(x, y, z),
                Point3::new(x + 1.0, y, z),
                Point3::new(x + 1.0, y, z + 1.0),
                Point3::new(x, y, z + 1.0),
            ],
            FaceDirection::UP => [
                Point3::new(x, y + 1.0, z),
                Point3::new(x + 1.0, y + 1.0, z),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
                Point3::new(x, y + 1.0, z + 1.0),
            ],
            FaceDirection::NORTH => [
                Point3::new(x, y, z),
                Point3::new(x + 1.0, y, z),
                Point3::new(x + 1.0, y + 1.0, z),
                Point3::new(x, y + 1.0, z),
            ],
            FaceDirection::SOUTH => [
                Point3::new(x, y, z + 1.0),
                Point3::new(x + 1.0, y, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
                Point3::new(x, y + 1.0, z + 1.0),
            ],
            FaceDirection::WEST => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1.0),
                Point3::new(x, y + 1.0, z + 1.0),
                Point3::new(x, y + 1.0, z),
            ],
            FaceDirection::EAST => [
                Point3::new(x + 1.0, y, z),
                Point3::new(x + 1.0, y, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_round_trips() {
        for direction in FaceDirection::all() {
            assert_eq!(FaceDirection::from_index(direction as u8), Some(direction));
        }
        assert_eq!(FaceDirection::from_index(6), None);
    }

    #[test]
    fn offsets_are_unit_steps() {
        for direction in FaceDirection::all() {
            let offset = direction.offset();
            assert_eq!(offset.x.abs() + offset.y.abs() + offset.z.abs(), 1);
        }
    }

    #[test]
    fn opposite_faces_offset_cancel() {
        assert_eq!(
            FaceDirection::UP.offset() + FaceDirection::DOWN.offset(),
            Vector3::new(0, 0, 0)
        );
        assert_eq!(
            FaceDirection::NORTH.offset() + FaceDirection::SOUTH.offset(),
            Vector3::new(0, 0, 0)
        );
        assert_eq!(
            FaceDirection::WEST.offset() + FaceDirection::EAST.offset(),
            Vector3::new(0, 0, 0)
        );
    }

    #[test]
    fn up_face_is_brightest_down_face_is_darkest() {
        let up = FaceDirection::UP.brightness();
        let down = FaceDirection::DOWN.brightness();
        for direction in FaceDirection::all() {
            let b = direction.brightness();
            assert!(b <= up && b >= down);
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        let base = Point3::new(2.0, -1.0, 5.0);
        for [a, b, c, d] in FaceDirection::all().map(|dir| dir.corners(base)) {
            // All four corners of an axis-aligned face share one coordinate.
            let shared_axis = (a.x == b.x && b.x == c.x && c.x == d.x)
                || (a.y == b.y && b.y == c.y && c.y == d.y)
                || (a.z == b.z && b.z == c.z && c.z == d.z);
            assert!(shared_axis);
        }
    }
}
