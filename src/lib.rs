//! Binary Puzzle Solution Enumerator
//!
//! Enumerates every valid filling of an N×N binary puzzle grid (the
//! Takuzu/Binairo rule set), one solution per call.
//!
//! ```
//! use binary_puzzle::SolutionSearch;
//!
//! let solutions: Vec<String> = SolutionSearch::new(2)?
//!     .map(|solution| solution.map(|grid| grid.into_string()))
//!     .collect::<binary_puzzle::Result<_>>()?;
//! assert_eq!(solutions, ["1001", "0110"]);
//! # Ok::<(), binary_puzzle::Error>(())
//! ```

pub mod error;
mod frontier;
pub mod grid;
mod node;
pub mod rules;
mod solver;

pub use error::{Error, Result};
pub use grid::{BitGrid, Solution, DIMENSION_LIMIT};
pub use solver::{count_solutions, SearchConfig, SearchStats, SolutionSearch};
