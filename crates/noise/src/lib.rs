#![warn(missing_docs)]
//! Noise primitives reproducing the game's gradient noise bit for bit:
//! Perlin and simplex octaves, the 1.18+ double Perlin climate noise and the
//! Beta 1.7 terrain samplers.

pub mod beta;
pub mod double_perlin;
pub mod octave;
pub mod perlin;
pub mod simplex;

pub use beta::{BetaClimate, BetaClimateNoise, BetaSurfaceNoise, ColumnNoise};
pub use double_perlin::DoublePerlinNoise;
pub use octave::{maintain_precision, OctaveNoise};
pub use perlin::PerlinNoise;
