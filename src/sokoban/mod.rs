//! Bounded-horizon Sokoban planning encoded as SAT

pub mod board;
pub mod decoder;
pub mod encoder;
pub mod problem;
pub mod state;
pub mod validator;

pub use board::{format_moves, Board, BoardState, CellKind, Direction, Position};
pub use encoder::SokobanEncoder;
pub use problem::{solve_sokoban, SokobanPlan, SokobanProblem};
pub use state::{Snapshot, StepKind};
pub use validator::{parse_moves, PlanValidation, PlanValidator};
