//! Version-independent biome queries.
//!
//! A [`Generator`] picks the engine for its version once: the Beta climate
//! lookup, the layer pipeline, or climate noise with a decision tree. All
//! engines answer the same two queries, a single cell and a rectangle.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use seedmap_climate::ModernGenerator;
use seedmap_core::{BiomeId, Era, GenError, McVersion};
use seedmap_layers::LayerStack;

use crate::beta::BetaEngine;
use crate::registry::TreeRegistry;

/// World options that change generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Large-biome world type (1.3 onwards).
    pub large_biomes: bool,
}

/// Engine backing a generator.
#[derive(Debug, Clone)]
pub enum Engine {
    #[allow(missing_docs)]
    Beta(BetaEngine),
    #[allow(missing_docs)]
    Legacy(LayerStack),
    #[allow(missing_docs)]
    Modern(ModernGenerator),
}

/// Biome generator for one version, options and seed.
#[derive(Debug, Clone)]
pub struct Generator {
    version: McVersion,
    options: GeneratorOptions,
    engine: Engine,
}

impl Generator {
    /// Build the generator for `version`, bound to seed 0.
    ///
    /// Fails when the version has no engine for `options` or needs a tree
    /// `trees` does not hold.
    pub fn new(
        version: McVersion,
        options: GeneratorOptions,
        trees: &TreeRegistry,
    ) -> Result<Self, GenError> {
        if options.large_biomes && !version.supports_large_biomes() {
            return Err(GenError::UnsupportedVersion(format!(
                "{version} has no large-biome world type"
            )));
        }
        let engine = match version.era() {
            Era::Beta => Engine::Beta(BetaEngine::new(0)),
            Era::Legacy => Engine::Legacy(LayerStack::new(version, options.large_biomes)?),
            Era::Modern => {
                let tree = trees.tree_for(version).ok_or_else(|| {
                    GenError::UnsupportedVersion(format!("{version} needs a decision tree"))
                })?;
                Engine::Modern(ModernGenerator::new(version, options.large_biomes, tree)?)
            }
        };
        debug!(%version, large_biomes = options.large_biomes, "created generator");
        Ok(Self {
            version,
            options,
            engine,
        })
    }

    /// Build and seed in one step.
    pub fn with_seed(
        version: McVersion,
        options: GeneratorOptions,
        trees: &TreeRegistry,
        seed: u64,
    ) -> Result<Self, GenError> {
        let mut g = Self::new(version, options, trees)?;
        g.apply_seed(seed);
        Ok(g)
    }

    /// Rebind every derived stream to `seed`. Applying the current seed
    /// again changes nothing.
    #[instrument(skip(self), fields(version = %self.version))]
    pub fn apply_seed(&mut self, seed: u64) {
        match &mut self.engine {
            Engine::Beta(b) => {
                if b.world_seed() != seed {
                    *b = BetaEngine::new(seed);
                }
            }
            Engine::Legacy(stack) => stack.apply_seed(seed),
            Engine::Modern(m) => m.apply_seed(seed),
        }
    }

    #[allow(missing_docs)]
    pub fn version(&self) -> McVersion {
        self.version
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// Seed currently bound.
    pub fn world_seed(&self) -> u64 {
        match &self.engine {
            Engine::Beta(b) => b.world_seed(),
            Engine::Legacy(stack) => stack.world_seed(),
            Engine::Modern(m) => m.world_seed(),
        }
    }

    #[allow(missing_docs)]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Layer graph, for layer-era versions.
    pub fn layer_stack(&self) -> Option<&LayerStack> {
        match &self.engine {
            Engine::Legacy(stack) => Some(stack),
            _ => None,
        }
    }

    /// Biome of the cell `(x, z)` at `scale` blocks per cell.
    ///
    /// `y` only matters from 1.18: a block height at scale 1, a 1:4 cell
    /// height otherwise.
    pub fn biome_at(&self, scale: u32, x: i32, y: i32, z: i32) -> Result<BiomeId, GenError> {
        match &self.engine {
            Engine::Beta(b) => b.biome_at(scale, x, z),
            Engine::Legacy(stack) => stack.biome_at(scale, x, z).map(BiomeId),
            Engine::Modern(m) => m.biome_at(scale, x, y, z),
        }
    }

    /// Row-major `w × h` cells at `scale` from `(x, z)`; cell `(i, j)`
    /// equals `biome_at(scale, x + i, y, z + j)`.
    pub fn area(
        &self,
        scale: u32,
        x: i32,
        z: i32,
        w: usize,
        h: usize,
        y: i32,
    ) -> Result<Vec<BiomeId>, GenError> {
        match &self.engine {
            Engine::Legacy(stack) => Ok(stack
                .area(scale, x, z, w, h)?
                .into_iter()
                .map(BiomeId)
                .collect()),
            Engine::Modern(m) => m.area(scale, x, z, w, h, y),
            Engine::Beta(b) => {
                let mut out = Vec::with_capacity(w * h);
                for j in 0..h {
                    for i in 0..w {
                        let cx = x.wrapping_add(i as i32);
                        let cz = z.wrapping_add(j as i32);
                        out.push(b.biome_at(scale, cx, cz)?);
                    }
                }
                Ok(out)
            }
        }
    }
}
