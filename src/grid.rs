//! Bit-packed grid storage and the solution type handed to callers.
//!
//! Cells are addressed row-major: `index = row * dimension + column`.
//! A `BitGrid` packs them eight to a byte, least significant bit first.

use std::collections::TryReserveError;
use std::fmt;

use crate::error::{Error, Result};

/// Exclusive upper bound on the grid dimension.
///
/// A completed row or column is packed into a `u64`, so every line must fit
/// in 64 bits; the largest even dimension below the bound is 62.
pub const DIMENSION_LIMIT: usize = 64;

/// Validates a requested dimension and narrows it to the stored width.
pub(crate) fn checked_dimension(dimension: usize) -> Result<u8> {
    if dimension == 0 || dimension % 2 != 0 || dimension >= DIMENSION_LIMIT {
        return Err(Error::InvalidDimension { dimension });
    }
    Ok(dimension as u8)
}

/// Fixed-capacity packed boolean matrix.
///
/// Capacity is fixed at construction. Bounds are not re-checked beyond what
/// slice indexing does; the search cursor never addresses a cell past the
/// last one.
#[derive(Debug, PartialEq, Eq)]
pub struct BitGrid {
    bytes: Vec<u8>,
    cell_count: usize,
}

impl BitGrid {
    /// Allocates an all-zero grid holding `cell_count` cells.
    pub fn try_new(cell_count: usize) -> std::result::Result<Self, TryReserveError> {
        let byte_count = cell_count.div_ceil(8);
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(byte_count)?;
        bytes.resize(byte_count, 0);
        Ok(Self { bytes, cell_count })
    }

    /// Number of cells the grid holds.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        (self.bytes[index / 8] >> (index % 8)) & 1 == 1
    }

    #[inline(always)]
    pub fn set(&mut self, index: usize, bit: bool) {
        let mask = 1u8 << (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> std::result::Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(self.bytes.len())?;
        bytes.extend_from_slice(&self.bytes);
        Ok(Self {
            bytes,
            cell_count: self.cell_count,
        })
    }

    /// Packs `count` cells starting at `start` and `stride` apart into a
    /// `u64`, first cell in bit 0.
    ///
    /// Rows use a stride of 1, columns a stride of the dimension.
    pub fn line_bits(&self, start: usize, stride: usize, count: usize) -> u64 {
        (0..count).fold(0u64, |bits, offset| {
            bits | (u64::from(self.get(start + offset * stride)) << offset)
        })
    }

    /// Renders the first `cell_count` cells as `0`/`1` characters.
    fn to_cell_string(&self) -> String {
        (0..self.cell_count)
            .map(|index| if self.get(index) { '1' } else { '0' })
            .collect()
    }
}

/// A completely filled, valid grid.
///
/// Holds `dimension²` characters from `{'0', '1'}` in row-major order with
/// no separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    dimension: u8,
    cells: String,
}

impl Solution {
    pub(crate) fn from_grid(grid: &BitGrid, dimension: u8) -> Self {
        Self {
            dimension,
            cells: grid.to_cell_string(),
        }
    }

    /// Parses a grid written as `0`/`1` characters in row-major order.
    ///
    /// Whitespace is ignored, so both `"0110"` and the multi-line
    /// space-separated form produced by [`Solution::format_rows`] are
    /// accepted. The cell count must be the square of a valid dimension.
    /// Only the shape is checked here; see [`crate::rules::is_solution_valid`].
    pub fn parse(text: &str) -> Result<Self> {
        let cells: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.is_empty() {
            return Err(Error::MalformedGrid("no cells given".to_string()));
        }
        if let Some(bad) = cells.chars().find(|&c| c != '0' && c != '1') {
            return Err(Error::MalformedGrid(format!("unexpected character {bad:?}")));
        }

        let cell_count = cells.len();
        let side = (cell_count as f64).sqrt().round() as usize;
        if side * side != cell_count {
            return Err(Error::MalformedGrid(format!(
                "{cell_count} cells do not form a square grid"
            )));
        }
        let dimension = checked_dimension(side)?;

        Ok(Self { dimension, cells })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    /// The row-major cell string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.cells
    }

    pub fn into_string(self) -> String {
        self.cells
    }

    /// Rows from top to bottom, each as a `dimension`-character slice.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        let dimension = self.dimension();
        (0..dimension).map(move |row| &self.cells[row * dimension..(row + 1) * dimension])
    }

    /// Column `column` read top to bottom.
    pub fn column(&self, column: usize) -> String {
        let dimension = self.dimension();
        self.cells
            .as_bytes()
            .iter()
            .skip(column)
            .step_by(dimension)
            .map(|&byte| byte as char)
            .collect()
    }

    /// All columns from left to right.
    pub fn columns(&self) -> Vec<String> {
        (0..self.dimension()).map(|column| self.column(column)).collect()
    }

    /// One line per row with cells separated by spaces.
    pub fn format_rows(&self) -> String {
        let mut output = String::with_capacity(self.cells.len() * 2);
        for row in self.rows() {
            for (position, cell) in row.chars().enumerate() {
                if position > 0 {
                    output.push(' ');
                }
                output.push(cell);
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cells)
    }
}
