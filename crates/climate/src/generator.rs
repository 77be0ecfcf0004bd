//! Seeded 1.18+ biome source.

use std::sync::Arc;

use tracing::{debug, instrument};

use seedmap_core::voronoi::{voronoi_access_3d, voronoi_sha};
use seedmap_core::{BiomeId, Era, GenError, McVersion};

use crate::params::{ClimateNoise, ClimateSample};
use crate::spline::Spline;
use crate::tree::DecisionTree;

/// Climate noise plus decision tree for one version and seed.
#[derive(Debug, Clone)]
pub struct ModernGenerator {
    version: McVersion,
    large_biomes: bool,
    world_seed: u64,
    sha: u64,
    noise: ClimateNoise,
    offset: Arc<Spline>,
    tree: Arc<DecisionTree>,
}

impl ModernGenerator {
    /// Generator for `version` bound to seed 0.
    pub fn new(
        version: McVersion,
        large_biomes: bool,
        tree: Arc<DecisionTree>,
    ) -> Result<Self, GenError> {
        if version.era() != Era::Modern {
            return Err(GenError::UnsupportedVersion(format!(
                "{version} does not use climate noise"
            )));
        }
        debug!(%version, large_biomes, nodes = tree.nodes().len(), "built climate generator");
        Ok(Self {
            version,
            large_biomes,
            world_seed: 0,
            sha: voronoi_sha(0),
            noise: ClimateNoise::new(0, large_biomes),
            offset: Arc::new(Spline::terrain_offset()),
            tree,
        })
    }

    /// Rebind every noise to `seed`.
    #[instrument(skip(self), fields(version = %self.version))]
    pub fn apply_seed(&mut self, seed: u64) {
        if seed == self.world_seed {
            return;
        }
        self.world_seed = seed;
        self.sha = voronoi_sha(seed);
        self.noise = ClimateNoise::new(seed, self.large_biomes);
        debug!("reseeded climate noise");
    }

    #[allow(missing_docs)]
    pub fn version(&self) -> McVersion {
        self.version
    }

    #[allow(missing_docs)]
    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    /// Raw climate at the 1:4 cell `(x, y, z)`.
    pub fn climate_at(&self, x: i32, y: i32, z: i32) -> ClimateSample {
        self.noise.sample(&self.offset, x, y, z)
    }

    /// Biome at the 1:4 cell `(x, y, z)`.
    pub fn biome_at_cell(&self, x: i32, y: i32, z: i32) -> Result<BiomeId, GenError> {
        self.tree.lookup(&self.climate_at(x, y, z).quantize())
    }

    /// Biome of the cell `(x, z)` at `scale`. At 1:1 `y` is a block height,
    /// otherwise a 1:4 cell height. Scales above 4 sample the centre of
    /// each cell without the shift noise.
    pub fn biome_at(&self, scale: u32, x: i32, y: i32, z: i32) -> Result<BiomeId, GenError> {
        match scale {
            1 => {
                let (cx, cy, cz) = voronoi_access_3d(self.sha, x, y, z);
                self.biome_at_cell(cx, cy, cz)
            }
            4 => self.biome_at_cell(x, y, z),
            s if s > 4 && s % 4 == 0 => {
                let k = (s / 4) as i32;
                let centre = |v: i32| v.wrapping_mul(k).wrapping_add(k / 2);
                let climate = self.noise.sample_unshifted(&self.offset, centre(x), y, centre(z));
                self.tree.lookup(&climate.quantize())
            }
            _ => Err(GenError::UnsupportedScale {
                scale,
                version: self.version.to_string(),
            }),
        }
    }

    /// Row-major grid of `w × h` cells at `scale` starting at `(x, z)`.
    pub fn area(
        &self,
        scale: u32,
        x: i32,
        z: i32,
        w: usize,
        h: usize,
        y: i32,
    ) -> Result<Vec<BiomeId>, GenError> {
        let mut out = Vec::with_capacity(w * h);
        for j in 0..h {
            for i in 0..w {
                let cx = x.wrapping_add(i as i32);
                let cz = z.wrapping_add(j as i32);
                out.push(self.biome_at(scale, cx, y, cz)?);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::split_tree;

    fn generator(seed: u64) -> ModernGenerator {
        let mut g = ModernGenerator::new(McVersion::V1_18, false, Arc::new(split_tree())).unwrap();
        g.apply_seed(seed);
        g
    }

    #[test]
    fn rejects_layer_versions() {
        let err = ModernGenerator::new(McVersion::V1_17, false, Arc::new(split_tree())).unwrap_err();
        assert!(matches!(err, GenError::UnsupportedVersion(_)));
    }

    #[test]
    fn cell_biome_follows_quantized_temperature() {
        let g = generator(1234);
        for (x, z) in [(0, 0), (40, -12), (-300, 77)] {
            let t = g.climate_at(x, 16, z).quantize()[0];
            let expected = if t <= 0 { BiomeId::PLAINS } else { BiomeId::DESERT };
            assert_eq!(g.biome_at(4, x, 16, z).unwrap(), expected);
        }
    }

    #[test]
    fn coarse_scales_sample_cell_centres() {
        let g = generator(99);
        let unshifted = |x, z| {
            let climate = g.noise.sample_unshifted(&g.offset, x, 0, z);
            g.tree.lookup(&climate.quantize()).unwrap()
        };
        assert_eq!(g.biome_at(16, 3, 0, -2).unwrap(), unshifted(14, -6));
        assert_eq!(g.biome_at(64, 1, 0, 1).unwrap(), unshifted(24, 24));
        for (x, z) in [(0, 0), (-9, 4), (31, -17)] {
            assert_eq!(g.biome_at(256, x, 0, z).unwrap(), unshifted(x * 64 + 32, z * 64 + 32));
        }
    }

    #[test]
    fn bad_scales_are_rejected() {
        let g = generator(5);
        for scale in [0, 2, 6, 10] {
            assert!(matches!(
                g.biome_at(scale, 0, 0, 0),
                Err(GenError::UnsupportedScale { .. })
            ));
        }
    }

    #[test]
    fn reseeding_is_idempotent() {
        let mut g = generator(7);
        let before = g.climate_at(10, 0, 10);
        g.apply_seed(7);
        assert_eq!(before, g.climate_at(10, 0, 10));
        g.apply_seed(8);
        assert_ne!(before, g.climate_at(10, 0, 10));
    }

    #[test]
    fn area_matches_points() {
        let g = generator(2024);
        let grid = g.area(1, -5, 9, 4, 3, 64).unwrap();
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(grid[j * 4 + i], g.biome_at(1, -5 + i as i32, 64, 9 + j as i32).unwrap());
            }
        }
    }
}
