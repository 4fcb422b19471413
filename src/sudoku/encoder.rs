//! Constraint generation for the Sudoku SAT encoding
//!
//! A cell/digit pair is one boolean: `Digit { row, col, digit }` with all
//! three components in 1..=9. The formula is the conjunction of
//!
//! * clue units for every fixed cell,
//! * coverage: each digit appears somewhere in every row, column and block,
//! * uniqueness: no cell carries two digits.
//!
//! Coverage over nine cells plus at most one digit per cell forces every
//! unit to be a permutation of 1..=9, so these families alone are sound and
//! complete. `explicit_distinctness` adds the pairwise "digit appears at
//! most once per unit" clauses, which only strengthen propagation.

use super::grid::{SudokuGrid, Unit, SIZE};
use crate::error::Result;
use crate::sat::constraints::{at_least_one, at_most_one, Clause, Formula};
use crate::sat::{VariableManager, VariableSpace};

const DIGITS: std::ops::RangeInclusive<usize> = 1..=9;

/// Generates the CNF formula for one Sudoku grid
pub struct SudokuEncoder {
    variable_manager: VariableManager,
    explicit_distinctness: bool,
}

impl SudokuEncoder {
    pub fn new(explicit_distinctness: bool) -> Result<Self> {
        Ok(Self {
            variable_manager: VariableManager::new(VariableSpace::Sudoku)?,
            explicit_distinctness,
        })
    }

    /// Generate all clauses for `grid`
    pub fn encode(&mut self, grid: &SudokuGrid) -> Result<Formula> {
        let mut formula = Formula::new();

        formula.extend(self.clue_clauses(grid)?);
        formula.extend(self.coverage_clauses()?);
        formula.extend(self.cell_uniqueness_clauses()?);

        if self.explicit_distinctness {
            formula.extend(self.unit_distinctness_clauses()?);
        }

        Ok(formula)
    }

    /// Variable for a 0-based cell holding `digit`
    fn cell_digit(&mut self, row: usize, col: usize, digit: usize) -> Result<i32> {
        self.variable_manager.digit_variable(row + 1, col + 1, digit)
    }

    /// Variables for `digit` over the cells of `unit`
    fn unit_digit_variables(&mut self, unit: Unit, digit: usize) -> Result<Vec<i32>> {
        unit.cells()
            .into_iter()
            .map(|(row, col)| self.cell_digit(row, col, digit))
            .collect()
    }

    fn clue_clauses(&mut self, grid: &SudokuGrid) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for (row, col, digit) in grid.clues() {
            clauses.push(Clause::unit(self.cell_digit(row, col, digit as usize)?));
        }
        Ok(clauses)
    }

    /// Every digit appears at least once in every row, column and block
    fn coverage_clauses(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for unit in Unit::all() {
            for digit in DIGITS {
                let vars = self.unit_digit_variables(unit, digit)?;
                clauses.push(at_least_one(&vars));
            }
        }

        Ok(clauses)
    }

    /// No cell holds two digits
    fn cell_uniqueness_clauses(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                let vars = DIGITS
                    .map(|digit| self.cell_digit(row, col, digit))
                    .collect::<Result<Vec<_>>>()?;
                clauses.extend(at_most_one(&vars));
            }
        }

        Ok(clauses)
    }

    /// No digit appears twice in a row, column or block
    fn unit_distinctness_clauses(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for unit in Unit::all() {
            for digit in DIGITS {
                let vars = self.unit_digit_variables(unit, digit)?;
                clauses.extend(at_most_one(&vars));
            }
        }

        Ok(clauses)
    }

    pub fn variable_manager(&self) -> &VariableManager {
        &self.variable_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::VariableType;

    #[test]
    fn test_blank_grid_clause_counts() {
        let mut encoder = SudokuEncoder::new(false).unwrap();
        let formula = encoder.encode(&SudokuGrid::blank()).unwrap();

        // 27 units x 9 digits coverage, 81 cells x 36 digit pairs
        assert_eq!(formula.len(), 243 + 81 * 36);
        assert_eq!(encoder.variable_manager().variable_count(), 729);
        assert!(!formula.has_empty_clause());
    }

    #[test]
    fn test_explicit_distinctness_adds_pairwise_clauses() {
        let mut plain = SudokuEncoder::new(false).unwrap();
        let mut strict = SudokuEncoder::new(true).unwrap();

        let plain_len = plain.encode(&SudokuGrid::blank()).unwrap().len();
        let strict_len = strict.encode(&SudokuGrid::blank()).unwrap().len();
        assert_eq!(strict_len - plain_len, 27 * 9 * 36);
    }

    #[test]
    fn test_clues_become_unit_clauses() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        rows[8][3] = 2;
        let grid = SudokuGrid::from_rows(rows).unwrap();

        let mut encoder = SudokuEncoder::new(false).unwrap();
        let formula = encoder.encode(&grid).unwrap();

        let units: Vec<_> = formula.clauses().iter().filter(|c| c.is_unit()).collect();
        assert_eq!(units.len(), 2);

        let vm = encoder.variable_manager();
        assert_eq!(vm.lookup(units[0].literals[0]), Some(VariableType::Digit { row: 1, col: 1, digit: 5 }));
        assert_eq!(vm.lookup(units[1].literals[0]), Some(VariableType::Digit { row: 9, col: 4, digit: 2 }));
    }

    #[test]
    fn test_block_coverage_clause_shape() {
        let mut encoder = SudokuEncoder::new(false).unwrap();
        let formula = encoder.encode(&SudokuGrid::blank()).unwrap();
        let vm = encoder.variable_manager();

        // Coverage for the last block and digit 9 is the last coverage clause
        let clause = &formula.clauses()[242];
        assert_eq!(clause.literals.len(), 9);
        for &lit in &clause.literals {
            match vm.lookup(lit) {
                Some(VariableType::Digit { row, col, digit }) => {
                    assert!((7..=9).contains(&row));
                    assert!((7..=9).contains(&col));
                    assert_eq!(digit, 9);
                }
                other => panic!("unexpected variable {:?}", other),
            }
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let grid = SudokuGrid::parse(&"1........\n".repeat(9)).unwrap();
        let first = SudokuEncoder::new(false).unwrap().encode(&grid).unwrap();
        let second = SudokuEncoder::new(false).unwrap().encode(&grid).unwrap();
        assert_eq!(first, second);
    }
}
