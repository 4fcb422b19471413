//! Recover a filled grid from a solver model

use super::grid::{SudokuGrid, SIZE};
use crate::error::{PuzzleError, Result};
use crate::sat::{SolverSolution, VariableManager, VariableType};

/// Rebuild the grid from the positive literals of `solution`.
///
/// Every cell must be asserted exactly one digit and every clue must come
/// back unchanged; anything else is a decode inconsistency.
pub fn decode(
    solution: &SolverSolution,
    variable_manager: &VariableManager,
    clues: &SudokuGrid,
) -> Result<SudokuGrid> {
    let mut grid = SudokuGrid::blank();

    for literal in solution.positive_literals() {
        let Some(VariableType::Digit { row, col, digit }) = variable_manager.lookup(literal) else {
            continue;
        };
        let (row, col, digit) = (row - 1, col - 1, digit as u8);

        let current = grid.get(row, col);
        if current != 0 && current != digit {
            return Err(PuzzleError::ConflictingCell {
                row,
                col,
                first: current,
                second: digit,
            });
        }
        grid.set(row, col, digit);
    }

    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = grid.get(row, col);
            if value == 0 {
                return Err(PuzzleError::UnassignedCell { row, col });
            }
            let clue = clues.get(row, col);
            if clue != 0 && clue != value {
                return Err(PuzzleError::ConflictingCell {
                    row,
                    col,
                    first: clue,
                    second: value,
                });
            }
        }
    }

    Ok(grid)
}
