#![warn(missing_docs)]
//! The 1.0–1.17 layer pipeline.
//!
//! A version's generator is a graph of grid transforms ("layers") built once
//! from declarative stack data. Each layer turns a window of its parents'
//! grids into a finer or rewritten grid of biome ids. Transforms are shared
//! between versions; era differences are passed to them as data.

mod biome;
mod climate;
mod hills;
mod land;
pub mod layer;
mod ocean;
pub mod relations;
mod river;
mod shore;
pub mod stack;
mod voronoi;
mod zoom;

pub use layer::{Layer, Transform};
pub use stack::{LayerSpec, LayerStack};
