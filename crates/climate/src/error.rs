//! Errors raised while loading or packing decision trees.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read, parse or validate a decision tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Filesystem failure.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The JSON document does not describe a tree.
    #[error("invalid tree json: {0}")]
    Json(#[from] serde_json::Error),
    /// Pack payload failed to (de)serialize or (de)compress.
    #[error("tree pack encoding failed: {0}")]
    Encoding(String),
    /// Pack payload does not match its stored checksum.
    #[error("tree pack checksum mismatch: header {expected:08x}, payload {actual:08x}")]
    Checksum {
        /// CRC32 recorded in the header.
        expected: u32,
        /// CRC32 of the payload read.
        actual: u32,
    },
    /// Pack header is truncated, has a foreign magic or an unknown version.
    #[error("malformed tree pack: {0}")]
    Pack(String),
    /// The C header text is missing an array or holds a bad literal.
    #[error("malformed tree header: {0}")]
    Header(String),
    /// Arrays parsed but do not form a usable tree.
    #[error("inconsistent tree shape: {0}")]
    Shape(String),
    /// No loader handles this file extension.
    #[error("unrecognised tree file {0}")]
    UnknownFormat(PathBuf),
}

impl From<bincode::Error> for TreeError {
    fn from(err: bincode::Error) -> Self {
        TreeError::Encoding(err.to_string())
    }
}
