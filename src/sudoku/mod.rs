//! 9x9 Sudoku encoded as SAT

pub mod decoder;
pub mod encoder;
pub mod grid;
pub mod problem;
pub mod validator;

pub use encoder::SudokuEncoder;
pub use grid::{SudokuGrid, Unit};
pub use problem::{solve_sudoku, SudokuProblem};
pub use validator::{SudokuValidation, SudokuValidator, SudokuViolation};
