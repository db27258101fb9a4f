//! LIFO stack of in-flight search nodes.

use std::collections::TryReserveError;

use crate::node::SearchNode;

/// Owns every node awaiting validation.
///
/// Depth-first traversal pops one node and pushes at most two per step, and
/// starts from two seeds, so the stack never holds more than
/// `dimension² + 1` nodes. Exceeding that is a driver bug.
#[derive(Debug)]
pub(crate) struct SearchFrontier {
    nodes: Vec<SearchNode>,
    capacity: usize,
}

impl SearchFrontier {
    pub fn new(dimension: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity: dimension * dimension + 1,
        }
    }

    /// Pushes a node, growing the backing storage fallibly.
    ///
    /// Panics if the depth bound would be exceeded.
    pub fn push(&mut self, node: SearchNode) -> Result<(), TryReserveError> {
        assert!(
            self.nodes.len() < self.capacity,
            "search frontier overflow: capacity {} exceeded",
            self.capacity
        );
        self.nodes.try_reserve(1)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Removes the most recently pushed node; `None` once exhausted.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.nodes.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every queued node and releases the backing storage.
    pub fn clear(&mut self) {
        self.nodes = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_returns_last_pushed() {
        let mut frontier = SearchFrontier::new(2);
        frontier.push(SearchNode::seed(2, false).unwrap()).unwrap();
        frontier.push(SearchNode::seed(2, true).unwrap()).unwrap();
        assert_eq!(frontier.len(), 2);

        assert!(frontier.pop().unwrap().cell(0));
        assert!(!frontier.pop().unwrap().cell(0));
        assert_eq!(frontier.len(), 0);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_clear_drops_queued_nodes() {
        let mut frontier = SearchFrontier::new(2);
        frontier.push(SearchNode::seed(2, true).unwrap()).unwrap();
        frontier.clear();
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    #[should_panic(expected = "search frontier overflow")]
    fn test_push_beyond_capacity_panics() {
        // dimension 2 allows 5 nodes
        let mut frontier = SearchFrontier::new(2);
        for _ in 0..6 {
            frontier.push(SearchNode::seed(2, false).unwrap()).unwrap();
        }
    }
}
