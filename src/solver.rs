//! Depth-first enumeration of every valid grid of a given dimension.
//!
//! Key properties:
//! - Explicit LIFO frontier instead of recursion, bounded by `dimension² + 1`
//! - Each node is validated only at the cell it just wrote
//! - Pull-based: every call to [`SolutionSearch::produce_next`] runs until
//!   the next solution or exhaustion, nothing is materialized up front
//! - Fully deterministic: the 1-branch is always explored before the 0-branch

use std::collections::TryReserveError;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::frontier::SearchFrontier;
use crate::grid::{checked_dimension, Solution};
use crate::node::SearchNode;
use crate::rules;

/// Parameters of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Grid side length; must be even, positive and below 64.
    pub dimension: usize,
    /// Reject grids with two identical rows or two identical columns.
    pub unique_lines: bool,
}

impl SearchConfig {
    /// Full rule set for `dimension`, uniqueness included.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            unique_lines: true,
        }
    }

    pub fn unique_lines(mut self, unique_lines: bool) -> Self {
        self.unique_lines = unique_lines;
        self
    }
}

/// Counters describing the work a search has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier.
    pub nodes_visited: u64,
    /// Popped nodes that broke a rule.
    pub nodes_pruned: u64,
    /// Solutions handed to the caller.
    pub solutions: u64,
    /// Largest frontier size observed.
    pub max_frontier_len: usize,
}

/// Lazy enumeration of all valid grids of one dimension.
///
/// Independent searches share nothing and may run on separate threads.
#[derive(Debug)]
pub struct SolutionSearch {
    dimension: u8,
    unique_lines: bool,
    frontier: SearchFrontier,
    stats: SearchStats,
    finished: bool,
}

impl SolutionSearch {
    /// Starts a search for `dimension` under the full rule set.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_config(SearchConfig::new(dimension))
    }

    /// Starts a search with explicit configuration.
    ///
    /// Fails with [`crate::Error::InvalidDimension`] before allocating
    /// anything if the dimension is odd, zero or not below 64.
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let dimension = checked_dimension(config.dimension)?;

        let mut frontier = SearchFrontier::new(config.dimension);
        // 0 goes in first so the 1-seed is popped first
        frontier.push(SearchNode::seed(dimension, false)?)?;
        frontier.push(SearchNode::seed(dimension, true)?)?;

        debug!(
            event = "search_start",
            dimension = config.dimension,
            unique_lines = config.unique_lines,
        );

        Ok(Self {
            dimension,
            unique_lines: config.unique_lines,
            stats: SearchStats {
                max_frontier_len: frontier.len(),
                ..SearchStats::default()
            },
            frontier,
            finished: false,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search until the next solution.
    ///
    /// Returns `Ok(None)` once every branch has been explored. After an
    /// allocation failure the frontier is released and every later call
    /// returns `Ok(None)`.
    pub fn produce_next(&mut self) -> Result<Option<Solution>> {
        match self.advance() {
            Ok(found) => Ok(found),
            Err(error) => {
                warn!(
                    event = "search_aborted",
                    dimension = self.dimension,
                    nodes_visited = self.stats.nodes_visited,
                    "allocation failed, dropping the remaining frontier"
                );
                self.frontier.clear();
                self.finished = true;
                Err(error.into())
            }
        }
    }

    fn advance(&mut self) -> std::result::Result<Option<Solution>, TryReserveError> {
        while let Some(node) = self.frontier.pop() {
            self.stats.nodes_visited += 1;

            if let Err(violation) = rules::check(&node, self.unique_lines) {
                self.stats.nodes_pruned += 1;
                trace!(index = node.index(), %violation, "pruned");
                continue;
            }

            if node.is_complete() {
                self.stats.solutions += 1;
                let solution = node.into_solution();
                trace!(%solution, "solution found");
                return Ok(Some(solution));
            }

            // the 1-branch goes on top so it is explored first
            let zero_branch = node.extend(false)?;
            let one_branch = node.extend(true)?;
            self.frontier.push(zero_branch)?;
            self.frontier.push(one_branch)?;

            self.stats.max_frontier_len = self.stats.max_frontier_len.max(self.frontier.len());
        }

        if !self.finished {
            self.finished = true;
            debug!(
                event = "search_exhausted",
                dimension = self.dimension,
                solutions = self.stats.solutions,
                nodes_visited = self.stats.nodes_visited,
                nodes_pruned = self.stats.nodes_pruned,
                max_frontier_len = self.stats.max_frontier_len,
            );
        }
        Ok(None)
    }
}

impl Iterator for SolutionSearch {
    type Item = Result<Solution>;

    fn next(&mut self) -> Option<Self::Item> {
        self.produce_next().transpose()
    }
}

impl FusedIterator for SolutionSearch {}

/// Exhausts a search and returns how many solutions it produced.
pub fn count_solutions(config: SearchConfig) -> Result<u64> {
    let mut search = SolutionSearch::with_config(config)?;
    while search.produce_next()?.is_some() {}
    Ok(search.stats().solutions)
}
