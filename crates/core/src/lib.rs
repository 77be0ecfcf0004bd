#![warn(missing_docs)]
//! Core primitives shared across the seedmap workspace: the game's random
//! streams, layer seed mixing, biome ids and version eras.

pub mod biome;
pub mod error;
pub mod rng;
pub mod seed;
pub mod version;
pub mod voronoi;

pub use biome::{BiomeId, BiomeTags};
pub use error::GenError;
pub use rng::{JavaRandom, RandomSource, Xoroshiro128PlusPlus};
pub use seed::LayerSeed;
pub use version::{Era, McVersion};
