//! Property tests for the decision tree search.
//!
//! A single-level tree has every leaf as a child of the root, so the search
//! must agree with a brute-force scan for the first leaf of least squared
//! distance.

use proptest::prelude::*;
use seedmap_climate::DecisionTree;
use seedmap_core::BiomeId;

fn distance(np: &[i64; 6], ranges: &[[i32; 2]; 6]) -> u64 {
    np.iter()
        .zip(ranges)
        .map(|(&v, &[lo, hi])| {
            let d = if v > hi as i64 {
                v - hi as i64
            } else if v < lo as i64 {
                lo as i64 - v
            } else {
                0
            };
            (d * d) as u64
        })
        .sum()
}

fn range() -> impl Strategy<Value = [i32; 2]> {
    (-20_000i32..20_000, 0i32..15_000).prop_map(|(lo, span)| [lo, lo + span])
}

fn leaves() -> impl Strategy<Value = Vec<[[i32; 2]; 6]>> {
    prop::collection::vec(prop::array::uniform6(range()), 1..8)
}

fn flat_tree(leaves: &[[[i32; 2]; 6]]) -> DecisionTree {
    let mut params = vec![[i32::MIN / 2, i32::MAX / 2]];
    let mut nodes = vec![1u64 << 48];
    for (k, ranges) in leaves.iter().enumerate() {
        let mut node = ((k as u64) + 1) << 48;
        for (axis, r) in ranges.iter().enumerate() {
            node |= (params.len() as u64) << (8 * axis);
            params.push(*r);
        }
        nodes.push(node);
    }
    DecisionTree::new(leaves.len() as u32, vec![1, 0], params, nodes).expect("valid tree")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn search_finds_first_nearest_leaf(
        leaves in leaves(),
        np in prop::array::uniform6(-30_000i64..30_000),
    ) {
        let tree = flat_tree(&leaves);
        let best = leaves
            .iter()
            .enumerate()
            .min_by_key(|(k, r)| (distance(&np, r), *k))
            .map(|(k, _)| k as i32 + 1)
            .unwrap();
        prop_assert_eq!(tree.lookup(&np).unwrap(), BiomeId(best));
    }

    #[test]
    fn inside_a_leaf_selects_it(leaves in leaves(), pick in 0usize..8) {
        let k = pick % leaves.len();
        let np: [i64; 6] = leaves[k].map(|[lo, hi]| ((lo as i64) + (hi as i64)) / 2);
        let tree = flat_tree(&leaves);
        let found = tree.lookup(&np).unwrap().0 as usize - 1;
        // An earlier leaf may contain the point too.
        prop_assert!(found <= k);
        prop_assert_eq!(distance(&np, &leaves[found]), 0);
    }
}
