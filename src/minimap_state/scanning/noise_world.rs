//! # Noise World
//!
//! A self-contained demo world for exercising the minimap without a host
//! game. Terrain is a Perlin heightmap with a sea, sandy shores, dirt and
//! stone strata, scattered ores, and the occasional oak tree. Everything is
//! derived deterministically from the seed, so repeated runs (and repeated
//! queries) always agree.

use noise::{NoiseFn, Perlin};

use crate::minimap_state::classification::{classify, MaterialKind};

use super::world_source::{WorldAccessError, WorldSource};

/// Scaling factor applied to world coordinates when sampling the heightmap.
const HEIGHT_NOISE_SCALE: f64 = 0.02;
/// Peak-to-valley half-range of the terrain, in voxels.
const HEIGHT_AMPLITUDE: f64 = 12.0;
/// Water fills open space at or below this height.
const SEA_LEVEL: i32 = 0;
/// Surfaces within this band above sea level are sandy shore.
const SHORE_BAND: i32 = 1;
/// Sea floors deeper than this below sea level turn to gravel.
const DEEP_FLOOR_DEPTH: i32 = 4;
/// Thickness of the dirt layer under grass surfaces.
const DIRT_DEPTH: i32 = 3;
/// Trunk height of generated trees, in voxels above the surface.
const TREE_TRUNK_HEIGHT: i32 = 4;
/// Chance per mille that a grassy column anchors a tree.
const TREE_CHANCE: u32 = 7;
/// Salt mixed into the coordinate hash for tree placement.
const TREE_SALT: u64 = 0x7452_EE31;

/// A deterministic procedurally generated world.
pub struct NoiseWorld {
    heightmap: Perlin,
    seed: u64,
}

impl NoiseWorld {
    /// Creates a world from a seed.
    pub fn new(seed: u32) -> Self {
        NoiseWorld {
            heightmap: Perlin::new(seed),
            seed: seed as u64,
        }
    }

    /// Terrain height of a column, before water and trees.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.heightmap.get([
            x as f64 * HEIGHT_NOISE_SCALE,
            z as f64 * HEIGHT_NOISE_SCALE,
        ]);
        SEA_LEVEL + (sample * HEIGHT_AMPLITUDE) as i32
    }

    /// A deterministic per-position roll in `0..1000`.
    fn roll(&self, x: i32, y: i32, z: i32, salt: u64) -> u32 {
        let mix = (x as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add((y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
            .wrapping_add((z as u64).wrapping_mul(0x1656_67B1_9E37_79F9))
            ^ self.seed
            ^ salt;
        let mut rng = fastrand::Rng::with_seed(mix);
        rng.u32(0..1000)
    }

    /// Whether a tree is rooted in this column.
    fn tree_at(&self, x: i32, z: i32) -> bool {
        let h = self.surface_height(x, z);
        // Trees only grow on grass, which keeps trunks out of the water.
        h > SEA_LEVEL + SHORE_BAND && self.roll(x, 0, z, TREE_SALT) < TREE_CHANCE
    }

    /// Tree material occupying a position above the terrain, if any.
    fn tree_block_at(&self, x: i32, y: i32, z: i32) -> Option<&'static str> {
        if self.tree_at(x, z) {
            let trunk_base = self.surface_height(x, z);
            if y > trunk_base && y <= trunk_base + TREE_TRUNK_HEIGHT {
                return Some("oak_log");
            }
        }

        // A canopy is a 3x3 cloud spanning the top two trunk heights of any
        // tree rooted one column away.
        for tree_x in (x - 1)..=(x + 1) {
            for tree_z in (z - 1)..=(z + 1) {
                if !self.tree_at(tree_x, tree_z) {
                    continue;
                }
                let canopy_base = self.surface_height(tree_x, tree_z) + TREE_TRUNK_HEIGHT;
                if y >= canopy_base && y <= canopy_base + 1 {
                    return Some("oak_leaves");
                }
            }
        }

        None
    }

    /// The material covering the top of a column.
    fn surface_material(&self, height: i32) -> &'static str {
        if height < SEA_LEVEL - DEEP_FLOOR_DEPTH {
            "gravel"
        } else if height <= SEA_LEVEL + SHORE_BAND {
            "sand"
        } else {
            "grass_block"
        }
    }

    /// The material of the stone stratum, with scattered ores.
    fn stratum_material(&self, x: i32, y: i32, z: i32) -> &'static str {
        match self.roll(x, y, z, 0) {
            0..=14 => "coal_ore",
            15..=24 => "iron_ore",
            25..=27 => "gold_ore",
            28..=29 => "diamond_ore",
            _ => "stone",
        }
    }
}

impl WorldSource for NoiseWorld {
    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<String, WorldAccessError> {
        let height = self.surface_height(x, z);

        let material = if y > height {
            if let Some(tree_material) = self.tree_block_at(x, y, z) {
                tree_material
            } else if y <= SEA_LEVEL {
                "water"
            } else {
                "air"
            }
        } else if y == height {
            self.surface_material(height)
        } else if y > height - DIRT_DEPTH {
            "dirt"
        } else {
            self.stratum_material(x, y, z)
        };

        Ok(String::from(material))
    }

    fn is_opaque(&self, material_id: &str) -> bool {
        let info = classify(material_id);
        info.kind != MaterialKind::AIR && !info.is_transparent
    }

    fn top_surface_y(&self, x: i32, z: i32) -> Result<i32, WorldAccessError> {
        let mut top = self.surface_height(x, z);

        for tree_x in (x - 1)..=(x + 1) {
            for tree_z in (z - 1)..=(z + 1) {
                if self.tree_at(tree_x, tree_z) {
                    let canopy_top =
                        self.surface_height(tree_x, tree_z) + TREE_TRUNK_HEIGHT + 1;
                    top = top.max(canopy_top);
                }
            }
        }

        // Water columns top out at sea level.
        Ok(top.max(SEA_LEVEL))
    }
}
