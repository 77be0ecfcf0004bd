#![warn(missing_docs)]
//! 1.18+ biome generation: six climate noises, the terrain offset spline
//! that feeds depth, and a data-driven interpreter for the biome decision
//! trees.

pub mod error;
pub mod generator;
pub mod loader;
pub mod params;
pub mod spline;
pub mod tree;

pub use error::TreeError;
pub use generator::ModernGenerator;
pub use loader::TreePack;
pub use params::{ClimateNoise, ClimateSample};
pub use spline::Spline;
pub use tree::{tree_name_for, DecisionTree};
