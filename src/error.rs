//! Error taxonomy for puzzle encoding and decoding

use thiserror::Error;

/// Errors raised by the encoding core.
///
/// Malformed input and capacity errors are reported before any clause is
/// emitted. Decode errors mean the model did not describe a complete,
/// consistent answer, which points at an encoding bug rather than at the
/// caller's input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Expected a {expected_rows}x{expected_cols} grid, found {rows} rows with {cols} columns")]
    InvalidDimensions {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Row {row} has length {len}, expected {expected} (all rows must have the same length)")]
    RaggedRows { row: usize, len: usize, expected: usize },

    #[error("Board is empty")]
    EmptyBoard,

    #[error("Invalid digit {value} at ({row}, {col}); only 0-9 are allowed")]
    InvalidDigit { row: usize, col: usize, value: u8 },

    #[error("Invalid cell code '{code}' at ({row}, {col})")]
    InvalidCellCode { row: usize, col: usize, code: char },

    #[error("Board must contain exactly one player, found {0}")]
    PlayerCount(usize),

    #[error("Variable {0} is outside the declared variable space")]
    VariableOutOfBounds(String),

    #[error("Encoding needs {required} variables, more than a solver literal can address")]
    VariableSpaceExhausted { required: u128 },

    #[error("Cell ({row}, {col}) has no digit in the model")]
    UnassignedCell { row: usize, col: usize },

    #[error("Cell ({row}, {col}) is assigned both {first} and {second}")]
    ConflictingCell {
        row: usize,
        col: usize,
        first: u8,
        second: u8,
    },

    #[error("{entity} has no position at timestep {t}")]
    MissingEntity { entity: String, t: usize },

    #[error("{entity} occupies more than one cell at timestep {t}")]
    AmbiguousEntity { entity: String, t: usize },

    #[error("Player moved from ({from_row}, {from_col}) to ({to_row}, {to_col}) in the step after timestep {t}")]
    IllegalStep {
        t: usize,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
}

impl PuzzleError {
    /// Whether the error was caused by the caller's input
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            PuzzleError::InvalidDimensions { .. }
                | PuzzleError::RaggedRows { .. }
                | PuzzleError::EmptyBoard
                | PuzzleError::InvalidDigit { .. }
                | PuzzleError::InvalidCellCode { .. }
                | PuzzleError::PlayerCount(_)
        )
    }

    /// Whether the error came from decoding a solver model
    pub fn is_decode_inconsistency(&self) -> bool {
        matches!(
            self,
            PuzzleError::UnassignedCell { .. }
                | PuzzleError::ConflictingCell { .. }
                | PuzzleError::MissingEntity { .. }
                | PuzzleError::AmbiguousEntity { .. }
                | PuzzleError::IllegalStep { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(PuzzleError::PlayerCount(2).is_malformed_input());
        assert!(!PuzzleError::PlayerCount(2).is_decode_inconsistency());

        let err = PuzzleError::UnassignedCell { row: 1, col: 2 };
        assert!(err.is_decode_inconsistency());
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_illegal_step_message() {
        let err = PuzzleError::IllegalStep {
            t: 3,
            from_row: 1,
            from_col: 1,
            to_row: 2,
            to_col: 2,
        };
        let message = err.to_string();
        assert!(message.contains("(1, 1)"));
        assert!(message.contains("after timestep 3"));
    }
}
