//! Query commands behind the `seedmap` subcommands.

use anyhow::{bail, Result};
use seedmap_core::{Era, McVersion};
use seedmap_world::{BiomeId, GeneratorCache, GeneratorOptions, TreeRegistry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// World seed from its textual form.
///
/// Integers are taken as written (negative values as their two's complement
/// bit pattern). Any other text hashes the way the game hashes text seeds,
/// with Java's `String.hashCode`.
pub fn parse_seed(text: &str) -> Result<u64> {
    let text = text.trim();
    if text.is_empty() {
        bail!("seed is empty");
    }
    if let Ok(seed) = text.parse::<i64>() {
        return Ok(seed as u64);
    }
    if let Ok(seed) = text.parse::<u64>() {
        return Ok(seed);
    }
    let hash = text
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    Ok(hash as i64 as u64)
}

/// One query: version, options and seed.
#[derive(Debug, Clone, Copy)]
pub struct Query {
    pub version: McVersion,
    pub options: GeneratorOptions,
    pub seed: u64,
    pub scale: u32,
}

/// Biome of one cell.
pub fn biome(cache: &GeneratorCache, q: &Query, x: i32, y: i32, z: i32) -> Result<BiomeId> {
    let generator = cache.get(q.version, q.options, q.seed)?;
    Ok(generator.biome_at(q.scale, x, y, z)?)
}

/// A generated rectangle.
#[derive(Debug, Serialize)]
pub struct AreaReport {
    pub version: McVersion,
    pub seed: i64,
    pub scale: u32,
    pub x: i32,
    pub z: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major biome ids.
    pub biomes: Vec<i32>,
    /// Cell count per biome name.
    pub histogram: BTreeMap<String, usize>,
}

/// Rectangle of `width × height` cells from `(x, z)`.
pub fn area(
    cache: &GeneratorCache,
    q: &Query,
    x: i32,
    z: i32,
    width: usize,
    height: usize,
    y: i32,
) -> Result<AreaReport> {
    if width == 0 || height == 0 {
        bail!("area must be at least 1x1, got {width}x{height}");
    }
    let generator = cache.get(q.version, q.options, q.seed)?;
    let grid = generator.area(q.scale, x, z, width, height, y)?;
    let mut histogram = BTreeMap::new();
    for id in &grid {
        *histogram.entry(id.to_string()).or_insert(0) += 1;
    }
    Ok(AreaReport {
        version: q.version,
        seed: q.seed as i64,
        scale: q.scale,
        x,
        z,
        width,
        height,
        biomes: grid.into_iter().map(|id| id.0).collect(),
        histogram,
    })
}

impl AreaReport {
    /// Rows of right-aligned ids followed by a legend.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in self.biomes.chunks(self.width) {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
            let _ = writeln!(out, "{}", cells.join(" "));
        }
        let mut legend: Vec<i32> = self.biomes.clone();
        legend.sort_unstable();
        legend.dedup();
        out.push('\n');
        for id in legend {
            let name = BiomeId(id).to_string();
            let _ = writeln!(out, "{id:>3} {name} ({})", self.histogram.get(&name).unwrap_or(&0));
        }
        out
    }
}

/// Supported versions with their engine and, for modern versions, whether
/// the tree is loaded.
pub fn versions_table(trees: &TreeRegistry) -> String {
    let mut out = String::new();
    for &version in McVersion::ALL {
        let engine = match version.era() {
            Era::Beta => "beta climate".to_string(),
            Era::Legacy => "layers".to_string(),
            Era::Modern => {
                let tree = seedmap_climate::tree_name_for(version).unwrap_or("?");
                let state = if trees.tree_for(version).is_some() {
                    "loaded"
                } else {
                    "missing"
                };
                format!("climate noise, {tree} ({state})")
            }
        };
        let large = if version.supports_large_biomes() {
            ", large biomes"
        } else {
            ""
        };
        let _ = writeln!(out, "{:<8} {engine}{large}", version.as_str());
    }
    out
}
