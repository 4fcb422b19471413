//! 9x9 Sudoku grid representation

use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIZE: usize = 9;
pub const BLOCK_SIZE: usize = 3;

/// A 9x9 grid of digits; 0 marks a blank cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SudokuGrid {
    cells: [[u8; SIZE]; SIZE],
}

impl SudokuGrid {
    /// An all-blank grid
    pub fn blank() -> Self {
        Self { cells: [[0; SIZE]; SIZE] }
    }

    /// Create a grid from rows, rejecting wrong dimensions and digits above 9
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        if rows.len() != SIZE {
            return Err(PuzzleError::InvalidDimensions {
                expected_rows: SIZE,
                expected_cols: SIZE,
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }

        let mut grid = Self::blank();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != SIZE {
                return Err(PuzzleError::InvalidDimensions {
                    expected_rows: SIZE,
                    expected_cols: SIZE,
                    rows: rows.len(),
                    cols: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 9 {
                    return Err(PuzzleError::InvalidDigit { row, col, value });
                }
                grid.cells[row][col] = value;
            }
        }

        Ok(grid)
    }

    /// Create a grid from a fixed-size array
    pub fn from_array(cells: [[u8; SIZE]; SIZE]) -> Result<Self> {
        Self::from_rows(cells.iter().map(|row| row.to_vec()).collect())
    }

    /// Parse the text format: nine lines of nine cells, `1`-`9` for clues and
    /// `0` or `.` for blanks. Whitespace inside a line is ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<Vec<char>> = content
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|line| !line.is_empty())
            .collect();

        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut values = Vec::with_capacity(line.len());
            for (col, &code) in line.iter().enumerate() {
                match code {
                    '.' => values.push(0),
                    '0'..='9' => values.push(code as u8 - b'0'),
                    _ => return Err(PuzzleError::InvalidCellCode { row, col, code }),
                }
            }
            rows.push(values);
        }

        Self::from_rows(rows)
    }

    /// Digit at (row, col), 0-based coordinates
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.cells[row][col] = digit;
    }

    /// Fixed clues as (row, col, digit), 0-based coordinates
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, &digit)| digit != 0)
                .map(move |(col, &digit)| (row, col, digit))
        })
    }

    pub fn blank_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&digit| digit == 0).count()
    }

    pub fn is_complete(&self) -> bool {
        self.blank_count() == 0
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// One line per row, `.` for blanks; the inverse of `parse`
    pub fn to_text(&self) -> String {
        let mut result = String::with_capacity(SIZE * (SIZE + 1));
        for row in &self.cells {
            for &digit in row {
                result.push(if digit == 0 { '.' } else { (b'0' + digit) as char });
            }
            result.push('\n');
        }
        result
    }
}

/// A row, column or 3x3 block, indexed 0..9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Row(usize),
    Column(usize),
    Block(usize),
}

impl Unit {
    /// All 27 units: rows, then columns, then blocks
    pub fn all() -> impl Iterator<Item = Unit> {
        (0..SIZE)
            .map(Unit::Row)
            .chain((0..SIZE).map(Unit::Column))
            .chain((0..SIZE).map(Unit::Block))
    }

    /// The nine (row, col) cells of this unit, 0-based
    pub fn cells(self) -> Vec<(usize, usize)> {
        match self {
            Unit::Row(row) => (0..SIZE).map(|col| (row, col)).collect(),
            Unit::Column(col) => (0..SIZE).map(|row| (row, col)).collect(),
            Unit::Block(block) => {
                let top = (block / BLOCK_SIZE) * BLOCK_SIZE;
                let left = (block % BLOCK_SIZE) * BLOCK_SIZE;
                (0..SIZE)
                    .map(|i| (top + i / BLOCK_SIZE, left + i % BLOCK_SIZE))
                    .collect()
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Row(i) => write!(f, "row {}", i + 1),
            Unit::Column(i) => write!(f, "column {}", i + 1),
            Unit::Block(i) => write!(f, "block {}", i + 1),
        }
    }
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
