//! Biome families and the similarity rules edge and hill layers rely on.

use seedmap_core::{BiomeId, McVersion};

/// Family a biome belongs to, named by its representative id.
///
/// From 1.16 the two wooded/plain badlands plateaus form their own family.
pub fn category(version: McVersion, id: i32) -> Option<BiomeId> {
    use BiomeId as B;
    let family = match BiomeId(id) {
        B::BEACH | B::SNOWY_BEACH => B::BEACH,
        B::DESERT | B::DESERT_HILLS | B::DESERT_LAKES => B::DESERT,
        B::MOUNTAINS
        | B::MOUNTAIN_EDGE
        | B::WOODED_MOUNTAINS
        | B::GRAVELLY_MOUNTAINS
        | B::MODIFIED_GRAVELLY_MOUNTAINS => B::MOUNTAINS,
        B::FOREST
        | B::WOODED_HILLS
        | B::BIRCH_FOREST
        | B::BIRCH_FOREST_HILLS
        | B::DARK_FOREST
        | B::FLOWER_FOREST
        | B::TALL_BIRCH_FOREST
        | B::TALL_BIRCH_HILLS
        | B::DARK_FOREST_HILLS => B::FOREST,
        B::SNOWY_TUNDRA | B::SNOWY_MOUNTAINS | B::ICE_SPIKES => B::SNOWY_TUNDRA,
        B::JUNGLE
        | B::JUNGLE_HILLS
        | B::JUNGLE_EDGE
        | B::MODIFIED_JUNGLE
        | B::MODIFIED_JUNGLE_EDGE
        | B::BAMBOO_JUNGLE
        | B::BAMBOO_JUNGLE_HILLS => B::JUNGLE,
        B::BADLANDS
        | B::ERODED_BADLANDS
        | B::MODIFIED_WOODED_BADLANDS_PLATEAU
        | B::MODIFIED_BADLANDS_PLATEAU => B::BADLANDS,
        B::WOODED_BADLANDS_PLATEAU | B::BADLANDS_PLATEAU => {
            if version <= McVersion::V1_15 {
                B::BADLANDS
            } else {
                B::BADLANDS_PLATEAU
            }
        }
        B::MUSHROOM_FIELDS | B::MUSHROOM_FIELD_SHORE => B::MUSHROOM_FIELDS,
        B::STONE_SHORE => B::STONE_SHORE,
        B::OCEAN
        | B::FROZEN_OCEAN
        | B::DEEP_OCEAN
        | B::WARM_OCEAN
        | B::LUKEWARM_OCEAN
        | B::COLD_OCEAN
        | B::DEEP_WARM_OCEAN
        | B::DEEP_LUKEWARM_OCEAN
        | B::DEEP_COLD_OCEAN
        | B::DEEP_FROZEN_OCEAN => B::OCEAN,
        B::PLAINS | B::SUNFLOWER_PLAINS => B::PLAINS,
        B::RIVER | B::FROZEN_RIVER => B::RIVER,
        B::SAVANNA | B::SAVANNA_PLATEAU | B::SHATTERED_SAVANNA | B::SHATTERED_SAVANNA_PLATEAU => {
            B::SAVANNA
        }
        B::SWAMP | B::SWAMP_HILLS => B::SWAMP,
        B::TAIGA
        | B::TAIGA_HILLS
        | B::SNOWY_TAIGA
        | B::SNOWY_TAIGA_HILLS
        | B::GIANT_TREE_TAIGA
        | B::GIANT_TREE_TAIGA_HILLS
        | B::TAIGA_MOUNTAINS
        | B::SNOWY_TAIGA_MOUNTAINS
        | B::GIANT_SPRUCE_TAIGA
        | B::GIANT_SPRUCE_TAIGA_HILLS => B::TAIGA,
        _ => return None,
    };
    Some(family)
}

/// Whether two biomes count as the same for edge and hill placement.
pub fn are_similar(version: McVersion, a: i32, b: i32) -> bool {
    if a == b {
        return true;
    }
    let plateau = |id: i32| {
        id == BiomeId::WOODED_BADLANDS_PLATEAU.0 || id == BiomeId::BADLANDS_PLATEAU.0
    };
    if version <= McVersion::V1_15 && plateau(a) {
        return plateau(b);
    }
    category(version, a) == category(version, b)
}

/// The `id + 128` variant the hills layer may promote a biome to.
///
/// 1.9 and 1.10 shifted the birch forest mutations by one.
pub fn mutation_of(version: McVersion, id: i32) -> Option<i32> {
    use BiomeId as B;
    let birch_quirk = (McVersion::V1_9..=McVersion::V1_10).contains(&version);
    let mutated = match BiomeId(id) {
        B::PLAINS => B::SUNFLOWER_PLAINS,
        B::DESERT => B::DESERT_LAKES,
        B::MOUNTAINS => B::GRAVELLY_MOUNTAINS,
        B::FOREST => B::FLOWER_FOREST,
        B::TAIGA => B::TAIGA_MOUNTAINS,
        B::SWAMP => B::SWAMP_HILLS,
        B::SNOWY_TUNDRA => B::ICE_SPIKES,
        B::JUNGLE => B::MODIFIED_JUNGLE,
        B::JUNGLE_EDGE => B::MODIFIED_JUNGLE_EDGE,
        B::BIRCH_FOREST if birch_quirk => B::TALL_BIRCH_HILLS,
        B::BIRCH_FOREST => B::TALL_BIRCH_FOREST,
        B::BIRCH_FOREST_HILLS if birch_quirk => return None,
        B::BIRCH_FOREST_HILLS => B::TALL_BIRCH_HILLS,
        B::DARK_FOREST => B::DARK_FOREST_HILLS,
        B::SNOWY_TAIGA => B::SNOWY_TAIGA_MOUNTAINS,
        B::GIANT_TREE_TAIGA => B::GIANT_SPRUCE_TAIGA,
        B::GIANT_TREE_TAIGA_HILLS => B::GIANT_SPRUCE_TAIGA_HILLS,
        B::WOODED_MOUNTAINS => B::MODIFIED_GRAVELLY_MOUNTAINS,
        B::SAVANNA => B::SHATTERED_SAVANNA,
        B::SAVANNA_PLATEAU => B::SHATTERED_SAVANNA_PLATEAU,
        B::BADLANDS => B::ERODED_BADLANDS,
        B::WOODED_BADLANDS_PLATEAU => B::MODIFIED_WOODED_BADLANDS_PLATEAU,
        B::BADLANDS_PLATEAU => B::MODIFIED_BADLANDS_PLATEAU,
        _ => return None,
    };
    Some(mutated.0)
}

/// Any ocean variant.
#[inline]
pub fn is_oceanic(id: i32) -> bool {
    BiomeId(id).is_oceanic()
}
