//! Errors surfaced by generator construction and queries.

use thiserror::Error;

/// Failure modes of biome generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// The requested version has no generator (or no decision tree loaded).
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    /// The engine cannot produce a grid at this scale.
    #[error("unsupported scale 1:{scale} for version {version}")]
    UnsupportedScale {
        /// Requested blocks per cell.
        scale: u32,
        /// Version label of the generator.
        version: String,
    },
    /// A decision tree referenced a node or parameter outside its data.
    #[error("decision tree traversal out of bounds: {0}")]
    InternalTraversalBounds(String),
}
