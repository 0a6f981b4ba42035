//! # Material Table Module
//!
//! The static material lookup data: an exact-match table generated with `phf`
//! and an ordered list of substring fallback rules. Colors are written as
//! packed `0xAARRGGBB` values.

use super::{MaterialInfo, MaterialKind};

/// Exact-match material table.
///
/// Keys are material identifier paths with the namespace already stripped.
/// Entries cover the materials a terrain scan is overwhelmingly likely to hit;
/// everything else falls through to [`FALLBACK_RULES`].
pub static MATERIAL_TABLE: phf::Map<&'static str, MaterialInfo> = phf::phf_map! {
    // Air in its three flavors. All resolve to the transparent zero-priority identity.
    "air" => MaterialInfo::AIR,
    "cave_air" => MaterialInfo::AIR,
    "void_air" => MaterialInfo::AIR,

    // Foliage, priority 100. Transparent so terrain can show through canopies.
    "oak_leaves" => MaterialInfo::new(0xFF4F7F00, MaterialKind::LEAVES, true, false, 100),
    "spruce_leaves" => MaterialInfo::new(0xFF2F5F2F, MaterialKind::LEAVES, true, false, 100),
    "birch_leaves" => MaterialInfo::new(0xFF7FCC19, MaterialKind::LEAVES, true, false, 100),
    "jungle_leaves" => MaterialInfo::new(0xFF2F7F2F, MaterialKind::LEAVES, true, false, 100),
    "acacia_leaves" => MaterialInfo::new(0xFF4F9F4F, MaterialKind::LEAVES, true, false, 100),
    "dark_oak_leaves" => MaterialInfo::new(0xFF1F4F1F, MaterialKind::LEAVES, true, false, 100),
    "mangrove_leaves" => MaterialInfo::new(0xFF5F7F1F, MaterialKind::LEAVES, true, false, 100),
    "cherry_leaves" => MaterialInfo::new(0xFFFFB7C5, MaterialKind::LEAVES, true, false, 100),

    // Wood, priority 80.
    "oak_log" => MaterialInfo::new(0xFF8F7748, MaterialKind::WOOD, false, false, 80),
    "oak_planks" => MaterialInfo::new(0xFF8F7748, MaterialKind::WOOD, false, false, 80),
    "spruce_log" => MaterialInfo::new(0xFF654321, MaterialKind::WOOD, false, false, 80),
    "spruce_planks" => MaterialInfo::new(0xFF654321, MaterialKind::WOOD, false, false, 80),
    "birch_log" => MaterialInfo::new(0xFFF7E9A3, MaterialKind::WOOD, false, false, 80),
    "birch_planks" => MaterialInfo::new(0xFFF7E9A3, MaterialKind::WOOD, false, false, 80),
    "jungle_log" => MaterialInfo::new(0xFF976D4D, MaterialKind::WOOD, false, false, 80),
    "jungle_planks" => MaterialInfo::new(0xFF976D4D, MaterialKind::WOOD, false, false, 80),
    "acacia_log" => MaterialInfo::new(0xFFD87F33, MaterialKind::WOOD, false, false, 80),
    "acacia_planks" => MaterialInfo::new(0xFFD87F33, MaterialKind::WOOD, false, false, 80),
    "dark_oak_log" => MaterialInfo::new(0xFF3F2F1F, MaterialKind::WOOD, false, false, 80),
    "dark_oak_planks" => MaterialInfo::new(0xFF3F2F1F, MaterialKind::WOOD, false, false, 80),
    "mangrove_log" => MaterialInfo::new(0xFF7F4F2F, MaterialKind::WOOD, false, false, 80),
    "mangrove_planks" => MaterialInfo::new(0xFF7F4F2F, MaterialKind::WOOD, false, false, 80),
    "cherry_log" => MaterialInfo::new(0xFFE8B4B8, MaterialKind::WOOD, false, false, 80),
    "cherry_planks" => MaterialInfo::new(0xFFE8B4B8, MaterialKind::WOOD, false, false, 80),
    "crimson_stem" => MaterialInfo::new(0xFF943F61, MaterialKind::WOOD, false, false, 80),
    "crimson_planks" => MaterialInfo::new(0xFF943F61, MaterialKind::WOOD, false, false, 80),
    "warped_stem" => MaterialInfo::new(0xFF3A8E8C, MaterialKind::WOOD, false, false, 80),
    "warped_planks" => MaterialInfo::new(0xFF3A8E8C, MaterialKind::WOOD, false, false, 80),

    // Fluids, priority 90. Water is transparent, lava is not.
    "water" => MaterialInfo::new(0xFF4040FF, MaterialKind::WATER, true, true, 90),
    "lava" => MaterialInfo::new(0xFFFF4500, MaterialKind::LAVA, false, true, 90),

    // Ground cover, priorities 40-60.
    "grass_block" => MaterialInfo::new(0xFF7FB238, MaterialKind::GRASS, false, false, 60),
    "dirt" => MaterialInfo::new(0xFF976D4D, MaterialKind::DIRT, false, false, 50),
    "coarse_dirt" => MaterialInfo::new(0xFF876D4D, MaterialKind::DIRT, false, false, 50),
    "podzol" => MaterialInfo::new(0xFF664B33, MaterialKind::DIRT, false, false, 50),
    "mycelium" => MaterialInfo::new(0xFF7F5F7F, MaterialKind::DIRT, false, false, 50),
    "sand" => MaterialInfo::new(0xFFF7E9A3, MaterialKind::SAND, false, false, 55),
    "red_sand" => MaterialInfo::new(0xFFD87F33, MaterialKind::SAND, false, false, 55),
    "gravel" => MaterialInfo::new(0xFF707070, MaterialKind::GRAVEL, false, false, 55),
    "stone" => MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 40),
    "cobblestone" => MaterialInfo::new(0xFF606060, MaterialKind::STONE, false, false, 40),
    "granite" => MaterialInfo::new(0xFF976D4D, MaterialKind::STONE, false, false, 40),
    "andesite" => MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 40),
    "diorite" => MaterialInfo::new(0xFFEDEDE3, MaterialKind::STONE, false, false, 40),
    "deepslate" => MaterialInfo::new(0xFF404040, MaterialKind::STONE, false, false, 40),
    "obsidian" => MaterialInfo::new(0xFF0F0F0F, MaterialKind::STONE, false, false, 60),

    // Ores, priority 45. Slightly above plain stone so seams read on the map.
    "coal_ore" => MaterialInfo::new(0xFF2F2F2F, MaterialKind::ORE, false, false, 45),
    "iron_ore" => MaterialInfo::new(0xFF8F7F6F, MaterialKind::ORE, false, false, 45),
    "gold_ore" => MaterialInfo::new(0xFFFFD700, MaterialKind::ORE, false, false, 45),
    "diamond_ore" => MaterialInfo::new(0xFF5CDBD5, MaterialKind::ORE, false, false, 45),
    "emerald_ore" => MaterialInfo::new(0xFF00D93A, MaterialKind::ORE, false, false, 45),
    "lapis_ore" => MaterialInfo::new(0xFF4A80FF, MaterialKind::ORE, false, false, 45),
    "redstone_ore" => MaterialInfo::new(0xFFFF0000, MaterialKind::ORE, false, false, 45),

    // Visually distinctive one-offs, priorities 70-85.
    "ice" => MaterialInfo::new(0xFFA0A0FF, MaterialKind::SPECIAL, true, false, 85),
    "packed_ice" => MaterialInfo::new(0xFF9090EE, MaterialKind::SPECIAL, false, false, 85),
    "blue_ice" => MaterialInfo::new(0xFF8080DD, MaterialKind::SPECIAL, false, false, 85),
    "snow" => MaterialInfo::new(0xFFFAFAFA, MaterialKind::SPECIAL, false, false, 70),
    "snow_block" => MaterialInfo::new(0xFFFAFAFA, MaterialKind::SPECIAL, false, false, 70),
    "glowstone" => MaterialInfo::new(0xFFFFE64D, MaterialKind::SPECIAL, false, false, 75),
};

/// Substring fallback rules, applied in order after an exact lookup misses.
///
/// The order is part of the contract: `leaves` must be tested before `log` so
/// that foliage variants never classify as wood, and the generic `stone` rule
/// comes last so it only catches materials nothing else claimed.
pub static FALLBACK_RULES: [(&str, MaterialInfo); 8] = [
    (
        "leaves",
        MaterialInfo::new(0xFF4F7F00, MaterialKind::LEAVES, true, false, 100),
    ),
    (
        "log",
        MaterialInfo::new(0xFF8F7748, MaterialKind::WOOD, false, false, 80),
    ),
    (
        "wood",
        MaterialInfo::new(0xFF8F7748, MaterialKind::WOOD, false, false, 80),
    ),
    (
        "water",
        MaterialInfo::new(0xFF4040FF, MaterialKind::WATER, true, true, 90),
    ),
    (
        "lava",
        MaterialInfo::new(0xFFFF4500, MaterialKind::LAVA, false, true, 90),
    ),
    (
        "grass",
        MaterialInfo::new(0xFF7FB238, MaterialKind::GRASS, false, false, 60),
    ),
    (
        "dirt",
        MaterialInfo::new(0xFF976D4D, MaterialKind::DIRT, false, false, 50),
    ),
    (
        "stone",
        MaterialInfo::new(0xFF707070, MaterialKind::STONE, false, false, 40),
    ),
];
