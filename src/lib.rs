//! Puzzle SAT solvers
//!
//! Encodes 9x9 Sudoku and bounded-horizon Sokoban as CNF, solves the
//! formula with an external SAT backend and decodes the model back into a
//! filled grid or a move sequence.

pub mod config;
pub mod error;
pub mod io;
pub mod outcome;
pub mod sat;
pub mod sokoban;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use error::PuzzleError;
pub use outcome::{SolveOutcome, SolveReport};
pub use sokoban::{solve_sokoban, BoardState, SokobanPlan, SokobanProblem};
pub use sudoku::{solve_sudoku, SudokuGrid, SudokuProblem};

use anyhow::{Context, Result};
use outcome::{PuzzleKind, ReportAnswer};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Solve one puzzle file, picking the puzzle type from its extension.
/// Sokoban boards are solved within `settings.sokoban.horizon`.
pub fn solve_file<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<SolveReport> {
    let path = path.as_ref();
    let source = path.display().to_string();

    match io::puzzle_kind(path) {
        Some(PuzzleKind::Sudoku) => {
            let grid = io::load_sudoku_from_file(path)?;
            let mut problem = SudokuProblem::new(settings.clone(), grid);
            let outcome = problem
                .solve()
                .with_context(|| format!("Failed to solve {}", source))?;

            let answer = outcome.into_solution().map(|grid| ReportAnswer::Grid(grid.rows()));
            Ok(SolveReport::new(source, PuzzleKind::Sudoku, answer, problem.statistics().cloned()))
        }
        Some(PuzzleKind::Sokoban) => {
            let state = io::load_board_from_file(path)?;
            let mut problem = SokobanProblem::new(settings.clone(), state);
            let outcome = problem
                .solve(settings.sokoban.horizon)
                .with_context(|| format!("Failed to solve {}", source))?;

            let answer = outcome.into_solution().map(|plan| ReportAnswer::Plan {
                moves: plan.to_symbols(),
                length: plan.len(),
            });
            Ok(SolveReport::new(source, PuzzleKind::Sokoban, answer, problem.statistics().cloned()))
        }
        None => anyhow::bail!("Unrecognised puzzle file extension: {}", source),
    }
}

/// Solve many puzzle files in parallel. Each file gets its own formula and
/// solver; results come back in input order.
pub fn solve_batch(paths: &[PathBuf], settings: &Settings) -> Vec<(PathBuf, Result<SolveReport>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), solve_file(path, settings)))
        .collect()
}
