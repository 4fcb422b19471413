//! Independent check of a filled grid against the Sudoku rules

use super::grid::{SudokuGrid, Unit, SIZE};
use std::fmt;

/// A rule broken by a candidate solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SudokuViolation {
    BlankCell { row: usize, col: usize },
    DuplicateDigit { unit: Unit, digit: u8 },
    ClueChanged { row: usize, col: usize, clue: u8, value: u8 },
}

impl fmt::Display for SudokuViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SudokuViolation::BlankCell { row, col } => {
                write!(f, "cell ({}, {}) is blank", row, col)
            }
            SudokuViolation::DuplicateDigit { unit, digit } => {
                write!(f, "{} contains {} more than once", unit, digit)
            }
            SudokuViolation::ClueChanged { row, col, clue, value } => {
                write!(f, "clue {} at ({}, {}) was replaced by {}", clue, row, col, value)
            }
        }
    }
}

/// Result of validating a Sudoku solution
#[derive(Debug, Clone, Default)]
pub struct SudokuValidation {
    pub violations: Vec<SudokuViolation>,
}

impl SudokuValidation {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for SudokuValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "Sudoku solution is valid");
        }
        writeln!(f, "Sudoku solution has {} violation(s):", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

pub struct SudokuValidator;

impl SudokuValidator {
    /// Check that `solution` is complete, every unit is a permutation of 1-9
    /// and every clue of `puzzle` survives
    pub fn validate(solution: &SudokuGrid, puzzle: &SudokuGrid) -> SudokuValidation {
        let mut violations = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = solution.get(row, col);
                if value == 0 {
                    violations.push(SudokuViolation::BlankCell { row, col });
                }
                let clue = puzzle.get(row, col);
                if clue != 0 && clue != value {
                    violations.push(SudokuViolation::ClueChanged { row, col, clue, value });
                }
            }
        }

        for unit in Unit::all() {
            let mut counts = [0u8; SIZE + 1];
            for (row, col) in unit.cells() {
                counts[solution.get(row, col) as usize] += 1;
            }
            for digit in 1..=SIZE {
                if counts[digit] > 1 {
                    violations.push(SudokuViolation::DuplicateDigit { unit, digit: digit as u8 });
                }
            }
        }

        SudokuValidation { violations }
    }
}
