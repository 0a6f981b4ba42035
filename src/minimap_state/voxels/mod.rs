//! # Voxels Module
//!
//! This module provides the voxel-level data model for the minimap: the face
//! visibility mask, the per-voxel scan record, and the snapshot grid that a
//! completed scan publishes.

use cgmath::Point3;
use face_direction::FaceDirection;

use super::classification::MaterialInfo;

pub mod face_direction;
pub mod snapshot;

/// A 6-bit face visibility mask.
///
/// Bit `i` corresponds to `FaceDirection` with value `i`, so the mask layout
/// is: [DOWN, UP, NORTH, SOUTH, WEST, EAST] from least significant bit up.
/// The two high bits of the backing byte are always zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct FaceMask(u8);

impl FaceMask {
    /// A mask with no visible faces.
    pub const EMPTY: FaceMask = FaceMask(0);

    /// A mask with all six faces visible.
    pub const ALL: FaceMask = FaceMask(0b0011_1111);

    /// Creates a mask from raw bits; bits above the six face bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        FaceMask(bits & Self::ALL.0)
    }

    /// Returns the raw bits of the mask.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Marks a face visible.
    pub fn set(&mut self, direction: FaceDirection) {
        self.0 |= 1 << (direction as u8);
    }

    /// Returns whether the given face is visible.
    pub fn contains(self, direction: FaceDirection) -> bool {
        self.0 & (1 << (direction as u8)) != 0
    }

    /// Returns whether no face is visible.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of visible faces.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// One voxel as captured by a terrain scan.
///
/// Created once during the scan pass and never mutated afterward; the snapshot
/// that contains it has exclusive ownership.
///
/// # Fields
/// - `material_id`: The raw material identifier sampled from the world
/// - `grid_pos`: The voxel's position within the scan window grid
/// - `visible_faces`: Which of the six faces passed the visibility rules
/// - `info`: The material classification looked up at scan time
/// - `surface_distance`: Vertical distance to the column's detected surface
#[derive(Clone, Debug)]
pub struct ScannedVoxel {
    /// The raw material identifier sampled from the world
    pub material_id: String,
    /// Position within the scan window grid (x, y, z indices)
    pub grid_pos: Point3<i32>,
    /// Which of the six faces passed the visibility rules
    pub visible_faces: FaceMask,
    /// The material classification looked up at scan time
    pub info: MaterialInfo,
    /// Vertical distance to the column's detected surface, in voxels
    pub surface_distance: u32,
}
