#![warn(missing_docs)]
//! One entry point for every supported version: build a [`Generator`],
//! bind a seed, then ask for single biomes or rectangles of them.

pub mod beta;
mod cache;
mod generator;
mod registry;

pub use beta::BetaEngine;
pub use cache::GeneratorCache;
pub use generator::{Engine, Generator, GeneratorOptions};
pub use registry::TreeRegistry;

pub use seedmap_core::{BiomeId, GenError, McVersion};
