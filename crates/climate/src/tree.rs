//! Interpreter for the packed biome parameter trees.
//!
//! Each node is a `u64`: the low six bytes index `params` (one `[min, max]`
//! range per climate axis) and the top 16 bits hold either the first child
//! of an inner node or, in the low byte, the biome of a leaf. Children of a
//! node at depth `d` are `steps[d]` apart. The search returns the leaf whose
//! ranges are closest to the climate vector in squared distance, keeping the
//! first leaf found on ties.

use serde::{Deserialize, Serialize};

use seedmap_core::{BiomeId, GenError, McVersion};

use crate::error::TreeError;

/// Children per inner node in every shipped tree.
pub const DEFAULT_ORDER: u32 = 10;

/// Name of the tree a version reads, if it uses one.
pub fn tree_name_for(version: McVersion) -> Option<&'static str> {
    use McVersion as V;
    match version {
        V::V1_18 => Some("btree18"),
        V::V1_19_2 => Some("btree192"),
        V::V1_19 => Some("btree19"),
        V::V1_20 | V::V1_21_1 | V::V1_21_3 => Some("btree20"),
        V::V1_21_WD => Some("btree21wd"),
        _ => None,
    }
}

/// An immutable biome parameter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTree {
    order: u32,
    steps: Vec<u32>,
    params: Vec<[i32; 2]>,
    nodes: Vec<u64>,
}

fn out_of_bounds(what: &str, idx: usize, len: usize) -> GenError {
    GenError::InternalTraversalBounds(format!("{what} index {idx} outside {len} entries"))
}

impl DecisionTree {
    /// Assemble a tree, rejecting shapes the search cannot walk.
    pub fn new(
        order: u32,
        steps: Vec<u32>,
        params: Vec<[i32; 2]>,
        nodes: Vec<u64>,
    ) -> Result<Self, TreeError> {
        if order == 0 {
            return Err(TreeError::Shape("order must be positive".into()));
        }
        if nodes.is_empty() {
            return Err(TreeError::Shape("no nodes".into()));
        }
        if params.is_empty() {
            return Err(TreeError::Shape("no parameter ranges".into()));
        }
        if steps.last() != Some(&0) {
            return Err(TreeError::Shape("steps must end with 0".into()));
        }
        if let Some(i) = params.iter().position(|[lo, hi]| lo > hi) {
            return Err(TreeError::Shape(format!("parameter range {i} is inverted")));
        }
        Ok(Self {
            order,
            steps,
            params,
            nodes,
        })
    }

    /// Children per inner node.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Child spacing per depth, terminated by 0.
    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    /// `[min, max]` ranges referenced by nodes.
    pub fn params(&self) -> &[[i32; 2]] {
        &self.params
    }

    /// Packed nodes.
    pub fn nodes(&self) -> &[u64] {
        &self.nodes
    }

    /// Biome of the leaf nearest to the quantized climate vector `np`.
    pub fn lookup(&self, np: &[i64; 6]) -> Result<BiomeId, GenError> {
        let leaf = self.resolve(np, 0, 0, u64::MAX, 0)?;
        let node = self.node(leaf)?;
        Ok(BiomeId(((node >> 48) & 0xFF) as i32))
    }

    fn node(&self, idx: usize) -> Result<u64, GenError> {
        self.nodes
            .get(idx)
            .copied()
            .ok_or_else(|| out_of_bounds("node", idx, self.nodes.len()))
    }

    fn step(&self, depth: usize) -> Result<usize, GenError> {
        self.steps
            .get(depth)
            .map(|&s| s as usize)
            .ok_or_else(|| out_of_bounds("step", depth, self.steps.len()))
    }

    /// Squared distance from `np` to the ranges of node `idx`.
    fn distance(&self, np: &[i64; 6], idx: usize) -> Result<u64, GenError> {
        let node = self.node(idx)?;
        let mut ds = 0u64;
        for (i, &v) in np.iter().enumerate() {
            let p = ((node >> (8 * i)) & 0xFF) as usize;
            let [lo, hi] = *self
                .params
                .get(p)
                .ok_or_else(|| out_of_bounds("parameter", p, self.params.len()))?;
            let above = v.wrapping_sub(hi as i64);
            let below = (lo as i64).wrapping_sub(v);
            let d = if above > 0 {
                above as u64
            } else if below > 0 {
                below as u64
            } else {
                0
            };
            ds = ds.wrapping_add(d.wrapping_mul(d));
        }
        Ok(ds)
    }

    fn resolve(
        &self,
        np: &[i64; 6],
        idx: usize,
        alt: usize,
        mut ds: u64,
        mut depth: usize,
    ) -> Result<usize, GenError> {
        if self.step(depth)? == 0 {
            return Ok(idx);
        }
        let len = self.nodes.len();
        let step = loop {
            let step = self.step(depth)?;
            depth += 1;
            if idx + step < len {
                break step;
            }
        };

        let mut inner = (self.node(idx)? >> 48) as usize;
        let mut leaf = alt;
        for _ in 0..self.order {
            let ds_inner = self.distance(np, inner)?;
            if ds_inner < ds {
                let candidate = self.resolve(np, inner, leaf, ds, depth)?;
                let ds_candidate = if candidate == inner {
                    ds_inner
                } else {
                    self.distance(np, candidate)?
                };
                if ds_candidate < ds {
                    ds = ds_candidate;
                    leaf = candidate;
                }
            }
            inner += step;
            if inner >= len {
                break;
            }
        }
        Ok(leaf)
    }
}
