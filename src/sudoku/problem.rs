//! Sudoku problem definition: encode, solve, decode, validate

use super::decoder::decode;
use super::encoder::SudokuEncoder;
use super::grid::SudokuGrid;
use super::validator::SudokuValidator;
use crate::config::Settings;
use crate::outcome::{EncodingStatistics, SolveOutcome};
use crate::sat::UnifiedSatSolver;
use anyhow::{Context, Result};

/// One Sudoku puzzle bound to the settings it is solved with
pub struct SudokuProblem {
    settings: Settings,
    puzzle: SudokuGrid,
    statistics: Option<EncodingStatistics>,
}

impl SudokuProblem {
    pub fn new(settings: Settings, puzzle: SudokuGrid) -> Self {
        Self {
            settings,
            puzzle,
            statistics: None,
        }
    }

    /// Solve the puzzle with a fresh formula and a fresh solver
    pub fn solve(&mut self) -> Result<SolveOutcome<SudokuGrid>> {
        let backend = self.settings.solver.backend;

        let mut encoder = SudokuEncoder::new(self.settings.sudoku.explicit_distinctness)?;
        let formula = encoder
            .encode(&self.puzzle)
            .context("Failed to encode Sudoku grid")?;

        let mut solver = UnifiedSatSolver::new(backend);
        solver
            .add_clauses(formula.clauses())
            .context("Failed to add Sudoku clauses to the solver")?;

        let model = solver.solve().context("SAT solving failed")?;

        self.statistics = Some(EncodingStatistics::from_solver(
            backend,
            encoder.variable_manager().variable_count(),
            formula.len(),
            None,
            &solver.statistics(),
        ));

        let Some(model) = model else {
            return Ok(SolveOutcome::Unsatisfiable);
        };

        let grid = decode(&model, encoder.variable_manager(), &self.puzzle)
            .context("Solver model does not decode to a Sudoku grid")?;

        let validation = SudokuValidator::validate(&grid, &self.puzzle);
        if !validation.is_valid() {
            anyhow::bail!("Decoded grid is not a valid solution:\n{}", validation);
        }

        Ok(SolveOutcome::Solved(grid))
    }

    pub fn puzzle(&self) -> &SudokuGrid {
        &self.puzzle
    }

    /// Statistics of the most recent `solve` call
    pub fn statistics(&self) -> Option<&EncodingStatistics> {
        self.statistics.as_ref()
    }
}

/// Solve a single grid with the given settings
pub fn solve_sudoku(puzzle: &SudokuGrid, settings: &Settings) -> Result<SolveOutcome<SudokuGrid>> {
    SudokuProblem::new(settings.clone(), puzzle.clone()).solve()
}
