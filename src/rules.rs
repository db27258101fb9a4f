//! Puzzle rules.
//!
//! A valid grid has, in every row and every column:
//! - exactly `dimension / 2` ones and as many zeros,
//! - no three equal consecutive cells,
//!
//! and no two rows (nor two columns) are identical.
//!
//! [`check`] applies these incrementally to the cell a node just wrote,
//! using only the node's own counts and already assigned cells. The
//! whole-grid validators below check finished grids from scratch.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::grid::Solution;
use crate::node::SearchNode;

/// The rule a pruned node broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("three equal cells in a row")]
    RowRun,
    #[error("three equal cells in a column")]
    ColumnRun,
    #[error("row can no longer balance zeros and ones")]
    RowBalance,
    #[error("column can no longer balance zeros and ones")]
    ColumnBalance,
    #[error("completed row repeats an earlier row")]
    DuplicateRow,
    #[error("completed column repeats an earlier column")]
    DuplicateColumn,
}

/// Validates the cell most recently written by `node`.
///
/// Every earlier cell was validated when it was written, so checking the
/// cursor cell is enough to keep the whole assigned prefix valid.
pub(crate) fn check(node: &SearchNode, unique_lines: bool) -> Result<(), Violation> {
    let dimension = node.dimension();
    let half = dimension / 2;
    let index = node.index();
    let row = node.row();
    let column = node.column();

    if column >= 2 && !is_mixed_triple(node, index, 1) {
        return Err(Violation::RowRun);
    }
    if row >= 2 && !is_mixed_triple(node, index, dimension) {
        return Err(Violation::ColumnRun);
    }

    let row_ones = node.row_sum() as usize;
    if row_ones > half || column + 1 - row_ones > half {
        return Err(Violation::RowBalance);
    }
    let column_ones = node.column_sum() as usize;
    if column_ones > half || row + 1 - column_ones > half {
        return Err(Violation::ColumnBalance);
    }

    if unique_lines {
        let grid = node.grid();
        if column == dimension - 1 {
            let row_bits = |r: usize| grid.line_bits(r * dimension, 1, dimension);
            let completed = row_bits(row);
            if (0..row).any(|earlier| row_bits(earlier) == completed) {
                return Err(Violation::DuplicateRow);
            }
        }
        // while the last row is written, every column left of the cursor is complete
        if row == dimension - 1 {
            let column_bits = |c: usize| grid.line_bits(c, dimension, dimension);
            let completed = column_bits(column);
            if (0..column).any(|earlier| column_bits(earlier) == completed) {
                return Err(Violation::DuplicateColumn);
            }
        }
    }

    Ok(())
}

/// True if the cell at `index` and the two before it along `stride` are not
/// all equal.
#[inline(always)]
fn is_mixed_triple(node: &SearchNode, index: usize, stride: usize) -> bool {
    let ones = u8::from(node.cell(index))
        + u8::from(node.cell(index - stride))
        + u8::from(node.cell(index - 2 * stride));
    (1..=2).contains(&ones)
}

/// Checks one complete line: balanced, and no three equal consecutive cells.
pub fn is_line_valid(cells: &[bool]) -> bool {
    let ones = cells.iter().filter(|&&cell| cell).count();
    if cells.len() % 2 != 0 || ones * 2 != cells.len() {
        return false;
    }
    cells
        .windows(3)
        .all(|triple| !(triple[0] == triple[1] && triple[1] == triple[2]))
}

/// Checks a complete grid against every rule, including line uniqueness.
pub fn is_solution_valid(solution: &Solution) -> bool {
    let to_cells = |line: &str| line.chars().map(|c| c == '1').collect::<Vec<_>>();

    let mut seen_rows: FxHashSet<&str> = FxHashSet::default();
    for row in solution.rows() {
        if !is_line_valid(&to_cells(row)) || !seen_rows.insert(row) {
            return false;
        }
    }

    let columns = solution.columns();
    let mut seen_columns: FxHashSet<&str> = FxHashSet::default();
    for column in &columns {
        if !is_line_valid(&to_cells(column.as_str())) || !seen_columns.insert(column.as_str()) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_from(dimension: u8, cells: &str) -> SearchNode {
        let mut bits = cells.chars().map(|c| c == '1');
        let mut node = SearchNode::seed(dimension, bits.next().unwrap()).unwrap();
        for bit in bits {
            node = node.extend(bit).unwrap();
        }
        node
    }

    fn line(cells: &str) -> Vec<bool> {
        cells.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_valid_prefixes_pass() {
        for prefix in ["1", "10", "100", "1001", "10010", "1001011", "1001011001011010"] {
            assert_eq!(check(&node_from(4, prefix), true), Ok(()), "prefix {prefix}");
        }
    }

    #[test]
    fn test_row_run_is_rejected() {
        // three zeros would also break balance in a 4-wide row, so use 6
        assert_eq!(check(&node_from(6, "000"), true), Err(Violation::RowRun));
        assert_eq!(check(&node_from(6, "0111"), true), Err(Violation::RowRun));
    }

    #[test]
    fn test_column_run_is_rejected() {
        // column 0 reads 1,1,1
        let node = node_from(6, concat!("100110", "100101", "1"));
        assert_eq!(check(&node, true), Err(Violation::ColumnRun));
    }

    #[test]
    fn test_row_balance_is_rejected() {
        assert_eq!(check(&node_from(4, "110"), true), Ok(()));
        assert_eq!(check(&node_from(4, "111"), true), Err(Violation::RowRun));
        assert_eq!(check(&node_from(6, "11011"), true), Err(Violation::RowBalance));
        assert_eq!(check(&node_from(6, "00100"), true), Err(Violation::RowBalance));
    }

    #[test]
    fn test_column_balance_is_rejected() {
        // column 0 reads 1,1,0,1,1: four ones in six rows
        let node = node_from(6, concat!("100110", "101001", "010110", "100101", "1"));
        assert_eq!(check(&node, true), Err(Violation::ColumnBalance));
    }

    #[test]
    fn test_duplicate_row_is_rejected_only_when_enforced() {
        let node = node_from(4, concat!("1001", "1001"));
        assert_eq!(check(&node, true), Err(Violation::DuplicateRow));
        assert_eq!(check(&node, false), Ok(()));
    }

    #[test]
    fn test_duplicate_column_is_rejected_only_when_enforced() {
        // columns 0 and 2 both read 1,0,0,1; the repeated rows go unnoticed
        // because row uniqueness is only checked when a row completes
        let node = node_from(4, concat!("1010", "0101", "0101", "101"));
        assert_eq!(check(&node, true), Err(Violation::DuplicateColumn));
        assert_eq!(check(&node, false), Ok(()));
    }

    #[test]
    fn test_line_validity() {
        assert!(is_line_valid(&line("0011")));
        assert!(is_line_valid(&line("0101")));
        assert!(!is_line_valid(&line("0111")));
        assert!(!is_line_valid(&line("100011")));
        assert!(!is_line_valid(&line("010")));
    }

    #[test]
    fn test_solution_validity() {
        let valid = Solution::parse(concat!("1001", "0110", "0101", "1010")).unwrap();
        assert!(is_solution_valid(&valid));

        // last column reads 1,0,1,1
        let unbalanced = Solution::parse(concat!("1001", "0110", "0101", "1001")).unwrap();
        assert!(!is_solution_valid(&unbalanced));

        let duplicate_rows = Solution::parse(concat!("1001", "0110", "0110", "1001")).unwrap();
        assert!(!is_solution_valid(&duplicate_rows));
    }
}
