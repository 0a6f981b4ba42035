//! # World Source Module
//!
//! The boundary contract between the minimap and whatever host world it is
//! sampling. The scanner only ever talks to this trait, so hosts can back it
//! with a live game world, a network cache, or a test fixture, and scans stay
//! safe to run from worker threads.

use thiserror::Error;

/// Errors a world source can raise while being sampled.
///
/// Any of these aborts the in-flight scan at the task boundary; the previous
/// snapshot remains authoritative and no partial data is ever published.
#[derive(Debug, Error)]
pub enum WorldAccessError {
    /// The queried position lies outside the region the source can serve.
    #[error("position ({x}, {y}, {z}) is outside the accessible region")]
    OutOfBounds {
        /// Queried x coordinate
        x: i32,
        /// Queried y coordinate
        y: i32,
        /// Queried z coordinate
        z: i32,
    },

    /// The source could not produce data for a reason of its own.
    #[error("world data unavailable: {0}")]
    Unavailable(String),
}

/// Read access to a voxel world, callable from worker threads.
///
/// Implementations must answer queries for any position inside the rectangular
/// region they advertise; the scanner clamps its window but still probes one
/// voxel beyond it for neighbor visibility, so sources should be lenient at
/// their edges rather than erroring.
pub trait WorldSource: Send + Sync {
    /// Returns the material identifier at a position.
    ///
    /// Open air must be reported as a material (e.g. `"air"`), not an error.
    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<String, WorldAccessError>;

    /// Returns whether a material blocks light completely.
    fn is_opaque(&self, material_id: &str) -> bool;

    /// Returns the y of the highest non-air block in a column.
    fn top_surface_y(&self, x: i32, z: i32) -> Result<i32, WorldAccessError>;

    /// Returns whether a position can see open sky.
    ///
    /// The default implementation walks upward from the position to the
    /// column's top surface and reports false at the first opaque block.
    /// Hosts with native sky-visibility data should override this.
    fn is_sky_visible(&self, x: i32, y: i32, z: i32) -> Result<bool, WorldAccessError> {
        let top = self.top_surface_y(x, z)?;
        if y >= top {
            return Ok(true);
        }
        for probe_y in (y + 1)..=top {
            let material_id = self.block_at(x, probe_y, z)?;
            if self.is_opaque(&material_id) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A single column: stone up to `surface_y`, one leaves block floating at
    /// `canopy_y`, air everywhere else.
    struct ColumnWorld {
        surface_y: i32,
        canopy_y: Option<i32>,
    }

    impl WorldSource for ColumnWorld {
        fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<String, WorldAccessError> {
            if y <= self.surface_y {
                Ok(String::from("stone"))
            } else if Some(y) == self.canopy_y {
                Ok(String::from("oak_leaves"))
            } else {
                Ok(String::from("air"))
            }
        }

        fn is_opaque(&self, material_id: &str) -> bool {
            material_id == "stone"
        }

        fn top_surface_y(&self, _x: i32, _z: i32) -> Result<i32, WorldAccessError> {
            Ok(self.canopy_y.unwrap_or(self.surface_y))
        }
    }

    #[test]
    fn positions_at_or_above_the_surface_see_sky() {
        let world = ColumnWorld {
            surface_y: 10,
            canopy_y: None,
        };
        assert!(world.is_sky_visible(0, 10, 0).unwrap());
        assert!(world.is_sky_visible(0, 25, 0).unwrap());
    }

    #[test]
    fn opaque_blocks_above_hide_the_sky() {
        let world = ColumnWorld {
            surface_y: 10,
            canopy_y: None,
        };
        assert!(!world.is_sky_visible(0, 5, 0).unwrap());
    }

    #[test]
    fn transparent_blocks_above_do_not_hide_the_sky() {
        let world = ColumnWorld {
            surface_y: -100,
            canopy_y: Some(12),
        };
        // Leaves are not opaque, so the probe passes through the canopy.
        assert!(world.is_sky_visible(0, 5, 0).unwrap());
    }
}
