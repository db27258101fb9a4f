//! Partial solutions explored by the search.
//!
//! A node's cursor (`index`, `row`, `column`) points at the cell written
//! most recently; every cell up to and including it is assigned, every cell
//! after it is meaningless. The running counts let the rules validate the
//! just-written cell without rescanning the grid.

use std::collections::TryReserveError;

use crate::grid::{BitGrid, Solution};

/// Snapshot of search progress. Never mutated once pushed on the frontier.
#[derive(Debug)]
pub(crate) struct SearchNode {
    grid: BitGrid,
    dimension: u8,
    index: usize,
    row: usize,
    column: usize,
    /// Ones written so far in `row`, including the cursor cell.
    row_sum: u8,
    /// Ones written so far in each column, across all rows up to the cursor.
    column_sums: Vec<u8>,
}

impl SearchNode {
    /// Creates a node with only cell 0 assigned, to `bit`.
    ///
    /// The first cell has nothing before it to constrain it, so the driver
    /// seeds one node per value.
    pub fn seed(dimension: u8, bit: bool) -> Result<Self, TryReserveError> {
        let side = dimension as usize;
        let mut grid = BitGrid::try_new(side * side)?;
        grid.set(0, bit);

        let mut column_sums = Vec::new();
        column_sums.try_reserve_exact(side)?;
        column_sums.resize(side, 0);
        column_sums[0] = u8::from(bit);

        Ok(Self {
            grid,
            dimension,
            index: 0,
            row: 0,
            column: 0,
            row_sum: u8::from(bit),
            column_sums,
        })
    }

    /// Returns a new node with the next cell assigned to `bit`.
    ///
    /// Must not be called on a complete node.
    pub fn extend(&self, bit: bool) -> Result<Self, TryReserveError> {
        debug_assert!(!self.is_complete(), "cannot extend a complete node");

        let mut grid = self.grid.try_clone()?;
        let mut column_sums = Vec::new();
        column_sums.try_reserve_exact(self.column_sums.len())?;
        column_sums.extend_from_slice(&self.column_sums);

        let (row, column, row_sum) = if self.column + 1 < self.dimension as usize {
            (self.row, self.column + 1, self.row_sum)
        } else {
            (self.row + 1, 0, 0)
        };
        let index = self.index + 1;

        grid.set(index, bit);
        column_sums[column] += u8::from(bit);

        Ok(Self {
            grid,
            dimension: self.dimension,
            index,
            row,
            column,
            row_sum: row_sum + u8::from(bit),
            column_sums,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub fn row_sum(&self) -> u8 {
        self.row_sum
    }

    /// Ones written so far in the cursor's column.
    #[inline]
    pub fn column_sum(&self) -> u8 {
        self.column_sums[self.column]
    }

    #[inline]
    pub fn grid(&self) -> &BitGrid {
        &self.grid
    }

    /// Reads an already assigned cell.
    #[inline]
    pub fn cell(&self, index: usize) -> bool {
        debug_assert!(index <= self.index, "cell {index} is past the cursor");
        self.grid.get(index)
    }

    /// True once the last cell of the grid has been written.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.index + 1 == self.grid.cell_count()
    }

    /// Consumes a complete node into the caller-facing solution.
    pub fn into_solution(self) -> Solution {
        debug_assert!(self.is_complete(), "only complete nodes are solutions");
        Solution::from_grid(&self.grid, self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a node by writing `cells` ('0'/'1') from cell 0 onward.
    fn node_from(dimension: u8, cells: &str) -> SearchNode {
        let mut bits = cells.chars().map(|c| c == '1');
        let mut node = SearchNode::seed(dimension, bits.next().unwrap()).unwrap();
        for bit in bits {
            node = node.extend(bit).unwrap();
        }
        node
    }

    #[test]
    fn test_seed_writes_first_cell() {
        let zero = SearchNode::seed(4, false).unwrap();
        let one = SearchNode::seed(4, true).unwrap();

        assert_eq!((zero.index(), zero.row(), zero.column()), (0, 0, 0));
        assert_eq!((zero.row_sum(), zero.column_sum()), (0, 0));
        assert!(!zero.cell(0));

        assert_eq!((one.row_sum(), one.column_sum()), (1, 1));
        assert!(one.cell(0));
    }

    #[test]
    fn test_extend_advances_within_row() {
        let node = node_from(4, "101");
        assert_eq!((node.index(), node.row(), node.column()), (2, 0, 2));
        assert_eq!(node.row_sum(), 2);
        assert_eq!(node.column_sum(), 1);
    }

    #[test]
    fn test_extend_rolls_over_and_resets_row_sum() {
        let node = node_from(4, "1100");
        assert_eq!(node.row_sum(), 2);

        let next_row = node.extend(true).unwrap();
        assert_eq!(
            (next_row.index(), next_row.row(), next_row.column()),
            (4, 1, 0)
        );
        assert_eq!(next_row.row_sum(), 1, "new row counts only its own cell");
        assert_eq!(next_row.column_sum(), 2, "column sums carry across rows");
    }

    #[test]
    fn test_extend_leaves_parent_untouched() {
        let parent = node_from(4, "10");
        let child = parent.extend(true).unwrap();

        assert_eq!(parent.index(), 1);
        assert_eq!(parent.row_sum(), 1);
        assert!(!parent.grid().get(2));
        assert!(child.cell(2));
        assert_eq!(child.row_sum(), 2);
    }

    #[test]
    fn test_column_sums_track_every_column() {
        // 1 0
        // 1 1
        let node = node_from(2, "1011");
        assert!(node.is_complete());
        assert_eq!(node.column_sums, [2, 1]);
    }

    #[test]
    fn test_into_solution_is_row_major() {
        let node = node_from(2, "0110");
        assert!(node.is_complete());
        assert_eq!(node.into_solution().as_str(), "0110");
    }
}
