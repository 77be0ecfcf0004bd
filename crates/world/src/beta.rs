//! Beta 1.7 biomes: a climate lookup over temperature and humidity, with
//! ocean wherever the terrain density at sea level is not positive.

use tracing::debug;

use seedmap_core::{BiomeId, GenError};
use seedmap_noise::{BetaClimate, BetaClimateNoise, BetaSurfaceNoise};

/// Climate biome for a temperature and humidity in `[0, 1]`.
///
/// Both values are quantized onto the 64×64 lookup grid the game builds at
/// startup, so the rule is evaluated at the grid point rather than at the
/// raw climate.
pub fn climate_biome(temperature: f32, humidity: f32) -> BiomeId {
    let i = (temperature * 63.0) as i32;
    let j = (humidity * 63.0) as i32;
    lookup_rule(i as f32 / 63.0, j as f32 / 63.0)
}

fn lookup_rule(t: f32, h: f32) -> BiomeId {
    use BiomeId as B;
    let rain = h * t;
    if t < 0.1 {
        return B::SNOWY_TUNDRA;
    }
    if rain < 0.2 {
        return if t < 0.5 {
            B::SNOWY_TUNDRA
        } else if t < 0.95 {
            B::SAVANNA
        } else {
            B::DESERT
        };
    }
    if rain > 0.5 && t < 0.7 {
        return B::SWAMP;
    }
    if t < 0.5 {
        return B::TAIGA;
    }
    if t < 0.97 {
        return if rain < 0.35 { B::SHRUBLAND } else { B::FOREST };
    }
    if rain < 0.45 {
        B::PLAINS
    } else if rain < 0.9 {
        B::SEASONAL_FOREST
    } else {
        B::RAINFOREST
    }
}

/// Seeded Beta 1.7 biome source.
#[derive(Debug, Clone)]
pub struct BetaEngine {
    world_seed: u64,
    climate: BetaClimateNoise,
    surface: BetaSurfaceNoise,
}

impl BetaEngine {
    /// Engine bound to `world_seed`.
    pub fn new(world_seed: u64) -> Self {
        let seed = world_seed as i64;
        debug!(world_seed, "seeded beta noise");
        Self {
            world_seed,
            climate: BetaClimateNoise::new(seed),
            surface: BetaSurfaceNoise::new(seed),
        }
    }

    #[allow(missing_docs)]
    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    /// Climate at block `(x, z)`.
    pub fn climate_at(&self, x: i32, z: i32) -> BetaClimate {
        self.climate.sample(x, z)
    }

    /// Biome of the cell `(x, z)` at `scale`, sampled at the cell's centre
    /// block. Coarser scales drop the terrain octaves finer than the cell.
    pub fn biome_at(&self, scale: u32, x: i32, z: i32) -> Result<BiomeId, GenError> {
        if scale == 0 {
            return Err(GenError::UnsupportedScale {
                scale,
                version: "b1.7".into(),
            });
        }
        let s = scale as i32;
        let mid = s >> 1;
        let bx = x.wrapping_mul(s).wrapping_add(mid);
        let bz = z.wrapping_mul(s).wrapping_add(mid);

        let climate = self.climate.sample(bx, bz);
        let land = climate_biome(climate.temperature as f32, climate.humidity as f32);
        let density = self
            .surface
            .sea_level_density(bx, bz, 4.0 / scale as f64, climate);
        if density > 0.0 {
            Ok(land)
        } else if climate.temperature < 0.5 {
            Ok(BiomeId::FROZEN_OCEAN)
        } else {
            Ok(BiomeId::OCEAN)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_corners() {
        assert_eq!(climate_biome(0.0, 0.0), BiomeId::SNOWY_TUNDRA);
        assert_eq!(climate_biome(1.0, 0.0), BiomeId::DESERT);
        assert_eq!(climate_biome(1.0, 1.0), BiomeId::RAINFOREST);
        assert_eq!(climate_biome(0.6, 1.0), BiomeId::SWAMP);
        assert_eq!(climate_biome(0.4, 0.8), BiomeId::TAIGA);
    }

    #[test]
    fn lookup_quantizes_before_the_rule() {
        // 0.1 falls on grid column 6 (0.095), still tundra.
        assert_eq!(climate_biome(0.1, 0.9), BiomeId::SNOWY_TUNDRA);
        // 0.97 falls on column 61 (0.968), still below the warm band.
        assert_eq!(climate_biome(0.97, 0.6), BiomeId::FOREST);
        assert_eq!(lookup_rule(0.97, 0.6), BiomeId::SEASONAL_FOREST);
    }

    #[test]
    fn mid_band_splits_on_rain() {
        assert_eq!(climate_biome(0.8, 0.3), BiomeId::SHRUBLAND);
        assert_eq!(climate_biome(0.8, 0.6), BiomeId::FOREST);
        assert_eq!(climate_biome(1.0, 0.6), BiomeId::SEASONAL_FOREST);
        assert_eq!(climate_biome(1.0, 0.4), BiomeId::PLAINS);
    }

    #[test]
    fn biomes_are_deterministic() {
        let a = BetaEngine::new(12345);
        let b = BetaEngine::new(12345);
        for (x, z) in [(61, -68), (0, 0), (-204, -718)] {
            assert_eq!(a.biome_at(4, x, z).unwrap(), b.biome_at(4, x, z).unwrap());
        }
    }

    #[test]
    fn zero_scale_is_rejected() {
        assert!(BetaEngine::new(1).biome_at(0, 0, 0).is_err());
    }
}
