//! # Material Classification Module
//!
//! This module maps raw material identifiers (e.g. `minecraft:oak_log`) to the
//! rendering data the minimap needs: a base color, a coarse kind tag,
//! transparency and fluid flags, and a compositing priority.
//!
//! Classification is a pure two-tier lookup:
//! 1. An exact-match static table covering the common materials.
//! 2. An ordered list of substring fallback rules for everything else.
//!
//! Priorities are grouped in documented bands so draw order stays predictable:
//! ground 40-60, ore 45, ice/special 70-85, wood 80, fluids 90, foliage 100.
//! Unknown materials land at 30 and air at 0.

use color::Rgba;
use material_table::{FALLBACK_RULES, MATERIAL_TABLE};

pub mod color;
pub mod material_table;

/// Coarse material categories used by the face visibility rules.
///
/// The kind tag deliberately collapses many concrete materials into a handful
/// of buckets: two adjacent voxels of the same kind usually do not need a
/// boundary face between them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Open air (including cave and void air)
    AIR,

    /// Tree canopies and other foliage
    LEAVES,

    /// Logs, stems, and planks
    WOOD,

    /// Stone and its many variants
    STONE,

    /// Dirt-like ground cover
    DIRT,

    /// Grass-topped ground
    GRASS,

    /// Water
    WATER,

    /// Lava
    LAVA,

    /// Sand and similar loose ground
    SAND,

    /// Gravel
    GRAVEL,

    /// Ore-bearing stone
    ORE,

    /// Visually distinctive one-offs (ice, snow, glowstone)
    SPECIAL,

    /// Anything the classifier has no rule for
    UNKNOWN,
}

/// The classification result for one material identifier.
///
/// Instances are immutable and cheap to copy; the static table hands out the
/// same values for the same identifier on every call.
///
/// # Fields
/// - `base_color`: The material's color before any face brightness is applied
/// - `kind`: The coarse category used by the visibility rules
/// - `is_transparent`: Whether the material is see-through (leaves, water, ice)
/// - `is_fluid`: Whether the material is a fluid (water, lava)
/// - `priority`: Compositing priority; higher values draw later and end up on top
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaterialInfo {
    /// The material's color before any face brightness is applied
    pub base_color: Rgba,
    /// The coarse category used by the visibility rules
    pub kind: MaterialKind,
    /// Whether the material is see-through
    pub is_transparent: bool,
    /// Whether the material is a fluid
    pub is_fluid: bool,
    /// Compositing priority; higher draws later / on top
    pub priority: i32,
}

impl MaterialInfo {
    /// The identity for open air: priority 0, fully transparent, invisible.
    pub const AIR: MaterialInfo = MaterialInfo::new(0x00000000, MaterialKind::AIR, true, false, 0);

    /// The fallback for unclassified materials: neutral gray at priority 30.
    pub const UNKNOWN: MaterialInfo =
        MaterialInfo::new(0xFF9E9E9E, MaterialKind::UNKNOWN, false, false, 30);

    /// Creates a material entry from a packed `0xAARRGGBB` color and its flags.
    ///
    /// This is `const` so entries can live in the static lookup table.
    pub const fn new(
        color: u32,
        kind: MaterialKind,
        is_transparent: bool,
        is_fluid: bool,
        priority: i32,
    ) -> Self {
        MaterialInfo {
            base_color: Rgba::from_argb(color),
            kind,
            is_transparent,
            is_fluid,
            priority,
        }
    }
}

/// Classifies a material identifier into its rendering data.
///
/// The identifier may carry a namespace prefix (`minecraft:stone`); only the
/// path after the last `:` is considered. Lookup order:
/// 1. Exact match against [`material_table::MATERIAL_TABLE`]
/// 2. First matching substring rule in [`material_table::FALLBACK_RULES`]
/// 3. [`MaterialInfo::UNKNOWN`]
///
/// # Arguments
/// * `material_id` - The material identifier, with or without a namespace
///
/// # Returns
/// The `MaterialInfo` for the identifier. This function never fails; an
/// unrecognized identifier classifies as `UNKNOWN`.
pub fn classify(material_id: &str) -> MaterialInfo {
    let key = match material_id.rsplit(':').next() {
        Some(path) => path,
        None => material_id,
    };

    if let Some(info) = MATERIAL_TABLE.get(key) {
        return *info;
    }

    for (needle, info) in FALLBACK_RULES.iter() {
        if key.contains(needle) {
            return *info;
        }
    }

    MaterialInfo::UNKNOWN
}
