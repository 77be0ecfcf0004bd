//! Biome identifiers.
//!
//! Numeric ids follow the game's legacy registry order (mutated variants at
//! `id + 128`, post-1.13 additions from 168). Beta 1.7 climate biomes that
//! were later removed occupy 51..=53.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric biome identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeId(pub i32);

macro_rules! biomes {
    ($($name:ident = $id:literal, $key:literal;)*) => {
        impl BiomeId {
            $(
                #[allow(missing_docs)]
                pub const $name: BiomeId = BiomeId($id);
            )*

            /// Every named biome in ascending id order.
            pub const ALL: &'static [BiomeId] = &[$(BiomeId($id)),*];

            /// Registry key, e.g. `"snowy_tundra"`.
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($id => Some($key),)*
                    _ => None,
                }
            }

            /// Parse a registry key.
            pub fn from_name(name: &str) -> Option<BiomeId> {
                match name {
                    $($key => Some(BiomeId($id)),)*
                    _ => None,
                }
            }
        }
    };
}

biomes! {
    OCEAN = 0, "ocean";
    PLAINS = 1, "plains";
    DESERT = 2, "desert";
    MOUNTAINS = 3, "mountains";
    FOREST = 4, "forest";
    TAIGA = 5, "taiga";
    SWAMP = 6, "swamp";
    RIVER = 7, "river";
    NETHER_WASTES = 8, "nether_wastes";
    THE_END = 9, "the_end";
    FROZEN_OCEAN = 10, "frozen_ocean";
    FROZEN_RIVER = 11, "frozen_river";
    SNOWY_TUNDRA = 12, "snowy_tundra";
    SNOWY_MOUNTAINS = 13, "snowy_mountains";
    MUSHROOM_FIELDS = 14, "mushroom_fields";
    MUSHROOM_FIELD_SHORE = 15, "mushroom_field_shore";
    BEACH = 16, "beach";
    DESERT_HILLS = 17, "desert_hills";
    WOODED_HILLS = 18, "wooded_hills";
    TAIGA_HILLS = 19, "taiga_hills";
    MOUNTAIN_EDGE = 20, "mountain_edge";
    JUNGLE = 21, "jungle";
    JUNGLE_HILLS = 22, "jungle_hills";
    JUNGLE_EDGE = 23, "jungle_edge";
    DEEP_OCEAN = 24, "deep_ocean";
    STONE_SHORE = 25, "stone_shore";
    SNOWY_BEACH = 26, "snowy_beach";
    BIRCH_FOREST = 27, "birch_forest";
    BIRCH_FOREST_HILLS = 28, "birch_forest_hills";
    DARK_FOREST = 29, "dark_forest";
    SNOWY_TAIGA = 30, "snowy_taiga";
    SNOWY_TAIGA_HILLS = 31, "snowy_taiga_hills";
    GIANT_TREE_TAIGA = 32, "giant_tree_taiga";
    GIANT_TREE_TAIGA_HILLS = 33, "giant_tree_taiga_hills";
    WOODED_MOUNTAINS = 34, "wooded_mountains";
    SAVANNA = 35, "savanna";
    SAVANNA_PLATEAU = 36, "savanna_plateau";
    BADLANDS = 37, "badlands";
    WOODED_BADLANDS_PLATEAU = 38, "wooded_badlands_plateau";
    BADLANDS_PLATEAU = 39, "badlands_plateau";
    SMALL_END_ISLANDS = 40, "small_end_islands";
    END_MIDLANDS = 41, "end_midlands";
    END_HIGHLANDS = 42, "end_highlands";
    END_BARRENS = 43, "end_barrens";
    WARM_OCEAN = 44, "warm_ocean";
    LUKEWARM_OCEAN = 45, "lukewarm_ocean";
    COLD_OCEAN = 46, "cold_ocean";
    DEEP_WARM_OCEAN = 47, "deep_warm_ocean";
    DEEP_LUKEWARM_OCEAN = 48, "deep_lukewarm_ocean";
    DEEP_COLD_OCEAN = 49, "deep_cold_ocean";
    DEEP_FROZEN_OCEAN = 50, "deep_frozen_ocean";
    SEASONAL_FOREST = 51, "seasonal_forest";
    RAINFOREST = 52, "rainforest";
    SHRUBLAND = 53, "shrubland";
    THE_VOID = 127, "the_void";
    SUNFLOWER_PLAINS = 129, "sunflower_plains";
    DESERT_LAKES = 130, "desert_lakes";
    GRAVELLY_MOUNTAINS = 131, "gravelly_mountains";
    FLOWER_FOREST = 132, "flower_forest";
    TAIGA_MOUNTAINS = 133, "taiga_mountains";
    SWAMP_HILLS = 134, "swamp_hills";
    ICE_SPIKES = 140, "ice_spikes";
    MODIFIED_JUNGLE = 149, "modified_jungle";
    MODIFIED_JUNGLE_EDGE = 151, "modified_jungle_edge";
    TALL_BIRCH_FOREST = 155, "tall_birch_forest";
    TALL_BIRCH_HILLS = 156, "tall_birch_hills";
    DARK_FOREST_HILLS = 157, "dark_forest_hills";
    SNOWY_TAIGA_MOUNTAINS = 158, "snowy_taiga_mountains";
    GIANT_SPRUCE_TAIGA = 160, "giant_spruce_taiga";
    GIANT_SPRUCE_TAIGA_HILLS = 161, "giant_spruce_taiga_hills";
    MODIFIED_GRAVELLY_MOUNTAINS = 162, "modified_gravelly_mountains";
    SHATTERED_SAVANNA = 163, "shattered_savanna";
    SHATTERED_SAVANNA_PLATEAU = 164, "shattered_savanna_plateau";
    ERODED_BADLANDS = 165, "eroded_badlands";
    MODIFIED_WOODED_BADLANDS_PLATEAU = 166, "modified_wooded_badlands_plateau";
    MODIFIED_BADLANDS_PLATEAU = 167, "modified_badlands_plateau";
    BAMBOO_JUNGLE = 168, "bamboo_jungle";
    BAMBOO_JUNGLE_HILLS = 169, "bamboo_jungle_hills";
    SOUL_SAND_VALLEY = 170, "soul_sand_valley";
    CRIMSON_FOREST = 171, "crimson_forest";
    WARPED_FOREST = 172, "warped_forest";
    BASALT_DELTAS = 173, "basalt_deltas";
    DRIPSTONE_CAVES = 174, "dripstone_caves";
    LUSH_CAVES = 175, "lush_caves";
    MEADOW = 177, "meadow";
    GROVE = 178, "grove";
    SNOWY_SLOPES = 179, "snowy_slopes";
    JAGGED_PEAKS = 180, "jagged_peaks";
    FROZEN_PEAKS = 181, "frozen_peaks";
    STONY_PEAKS = 182, "stony_peaks";
    DEEP_DARK = 183, "deep_dark";
    MANGROVE_SWAMP = 184, "mangrove_swamp";
    CHERRY_GROVE = 185, "cherry_grove";
    PALE_GARDEN = 186, "pale_garden";
}

bitflags! {
    /// Coarse properties the layer rules branch on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BiomeTags: u8 {
        /// Any ocean, shallow or deep.
        const OCEANIC = 1 << 0;
        /// Deep ocean variants.
        const DEEP_OCEAN = 1 << 1;
        /// Snow-covered surface.
        const SNOWY = 1 << 2;
        /// Badlands family.
        const MESA = 1 << 3;
        /// Mutated (`id + 128`) variant.
        const MUTATED = 1 << 4;
    }
}

impl BiomeId {
    /// Sentinel the pipeline never emits for a valid cell.
    pub const NONE: BiomeId = BiomeId(-1);

    /// Property flags of this id.
    pub fn tags(self) -> BiomeTags {
        let mut tags = BiomeTags::empty();
        match self.0 {
            0 | 10 | 44 | 45 | 46 => tags |= BiomeTags::OCEANIC,
            24 | 47..=50 => tags |= BiomeTags::OCEANIC | BiomeTags::DEEP_OCEAN,
            _ => {}
        }
        if matches!(self.0, 10 | 11 | 12 | 13 | 26 | 30 | 31 | 140 | 158) {
            tags |= BiomeTags::SNOWY;
        }
        if matches!(self.0, 37 | 38 | 39 | 165 | 166 | 167) {
            tags |= BiomeTags::MESA;
        }
        if (129..=167).contains(&self.0) {
            tags |= BiomeTags::MUTATED;
        }
        tags
    }

    /// Any ocean variant.
    pub fn is_oceanic(self) -> bool {
        self.tags().contains(BiomeTags::OCEANIC)
    }

    /// Ocean that is not a deep variant.
    pub fn is_shallow_ocean(self) -> bool {
        self.is_oceanic() && !self.is_deep_ocean()
    }

    /// Deep ocean variants.
    pub fn is_deep_ocean(self) -> bool {
        self.tags().contains(BiomeTags::DEEP_OCEAN)
    }

    /// Snow-covered biomes.
    pub fn is_snowy(self) -> bool {
        self.tags().contains(BiomeTags::SNOWY)
    }

    /// Badlands family.
    pub fn is_mesa(self) -> bool {
        self.tags().contains(BiomeTags::MESA)
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "biome#{}", self.0),
        }
    }
}

impl From<i32> for BiomeId {
    fn from(value: i32) -> Self {
        BiomeId(value)
    }
}
