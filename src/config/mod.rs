//! Configuration management for the puzzle solvers

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, OutputFormat, Settings, SokobanConfig, SolverBackend,
    SolverConfig, SudokuConfig,
};
