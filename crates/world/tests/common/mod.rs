#![allow(dead_code)]

use seedmap_climate::DecisionTree;
use seedmap_world::{BiomeId, TreeRegistry};

/// Four leaves split on temperature and humidity at zero.
pub const QUADRANT_TREE: &str = "\
#include <stdint.h>

enum { btree18_order = 10 };

static const uint32_t btree18_steps[] = { 1, 0 };

static const int32_t btree18_param[][2] =
{
    {-20000,20000},{-20000,-1},{0,20000},{-20000,0},{1,20000},
};

static const uint64_t btree18_nodes[] =
{
    0x0001000000000000,
    0x000c000000000301,0x0005000000000401,
    0x0002000000000302,0x0001000000000402,
};
";

pub const QUADRANT_BIOMES: [BiomeId; 4] = [
    BiomeId::SNOWY_TUNDRA,
    BiomeId::TAIGA,
    BiomeId::DESERT,
    BiomeId::PLAINS,
];

/// Registry serving the quadrant tree to every modern version.
pub fn quadrant_registry() -> TreeRegistry {
    let tree = DecisionTree::from_c_header(QUADRANT_TREE).expect("valid tree");
    let mut trees = TreeRegistry::empty();
    for name in ["btree18", "btree192", "btree19", "btree20", "btree21wd"] {
        trees.insert(name, tree.clone());
    }
    trees
}
