//! Error types for the binary puzzle search.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the search and by grid parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested dimension is odd, zero, or not below 64.
    #[error("invalid dimension {dimension}: expected a positive even number below 64")]
    InvalidDimension { dimension: usize },

    /// An allocation on the search path failed. The search that returned
    /// this error has released its frontier and yields nothing further.
    #[error("out of memory while extending the search")]
    OutOfMemory(#[from] TryReserveError),

    /// Text that does not describe a square grid of `0`/`1` cells.
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
}

/// Result type alias for binary puzzle operations.
pub type Result<T> = std::result::Result<T, Error>;
