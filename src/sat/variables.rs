//! Variable management for SAT encoding

use crate::error::{PuzzleError, Result};
use std::collections::HashMap;

/// Types of variables used in the SAT encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Sudoku cell (row, col) holds `digit`; all components are 1-based
    Digit { row: usize, col: usize, digit: usize },
    /// Sokoban player stands on (row, col) at timestep t
    Player { row: usize, col: usize, t: usize },
    /// Sokoban box `index` stands on (row, col) at timestep t
    Box { index: usize, row: usize, col: usize, t: usize },
}

/// The domain a `VariableManager` accepts tuples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSpace {
    /// 9x9 grid, digits 1-9
    Sudoku,
    /// `rows` x `cols` board, timesteps 0..=horizon, `boxes` boxes
    Sokoban {
        rows: usize,
        cols: usize,
        horizon: usize,
        boxes: usize,
    },
}

impl VariableSpace {
    /// Number of distinct tuples in this space
    pub fn capacity(&self) -> u128 {
        match *self {
            VariableSpace::Sudoku => 9 * 9 * 9,
            VariableSpace::Sokoban { rows, cols, horizon, boxes } => {
                (boxes as u128 + 1) * rows as u128 * cols as u128 * (horizon as u128 + 1)
            }
        }
    }

    fn contains(&self, var_type: &VariableType) -> bool {
        match (*self, *var_type) {
            (VariableSpace::Sudoku, VariableType::Digit { row, col, digit }) => {
                (1..=9).contains(&row) && (1..=9).contains(&col) && (1..=9).contains(&digit)
            }
            (VariableSpace::Sokoban { rows, cols, horizon, .. }, VariableType::Player { row, col, t }) => {
                row < rows && col < cols && t <= horizon
            }
            (VariableSpace::Sokoban { rows, cols, horizon, boxes }, VariableType::Box { index, row, col, t }) => {
                index < boxes && row < rows && col < cols && t <= horizon
            }
            _ => false,
        }
    }
}

/// Manages SAT variables and their mapping to integers.
///
/// Ids are handed out densely from 1 in first-reference order, so the
/// mapping is a bijection between the referenced tuples and `1..=count`
/// with no ceiling on board size or horizon beyond `i32` itself.
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Reverse map; `reverse[id - 1]` is the tuple for `id`
    reverse: Vec<VariableType>,
    space: VariableSpace,
}

impl VariableManager {
    /// Create a manager, failing if the space could overflow solver literals
    pub fn new(space: VariableSpace) -> Result<Self> {
        let required = space.capacity();
        if required > i32::MAX as u128 {
            return Err(PuzzleError::VariableSpaceExhausted { required });
        }

        Ok(Self {
            variable_map: HashMap::new(),
            reverse: Vec::new(),
            space,
        })
    }

    /// Get or create a variable ID for the given variable type
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        if !self.space.contains(&var_type) {
            return Err(PuzzleError::VariableOutOfBounds(format!("{:?}", var_type)));
        }

        // Bounded by capacity(), which new() checked against i32::MAX
        let id = self.reverse.len() as i32 + 1;
        self.reverse.push(var_type);
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    /// Sudoku: cell (row, col) holds digit, 1-based
    pub fn digit_variable(&mut self, row: usize, col: usize, digit: usize) -> Result<i32> {
        self.get_variable(VariableType::Digit { row, col, digit })
    }

    /// Sokoban: player at (row, col) at time t
    pub fn player_variable(&mut self, row: usize, col: usize, t: usize) -> Result<i32> {
        self.get_variable(VariableType::Player { row, col, t })
    }

    /// Sokoban: box `index` at (row, col) at time t
    pub fn box_variable(&mut self, index: usize, row: usize, col: usize, t: usize) -> Result<i32> {
        self.get_variable(VariableType::Box { index, row, col, t })
    }

    /// Invert an id back to its tuple
    pub fn lookup(&self, id: i32) -> Option<VariableType> {
        if id <= 0 {
            return None;
        }
        self.reverse.get(id as usize - 1).copied()
    }

    /// Get the total number of variables created
    pub fn variable_count(&self) -> usize {
        self.reverse.len()
    }

    pub fn space(&self) -> VariableSpace {
        self.space
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let mut stats = VariableStatistics {
            total_variables: self.variable_count(),
            ..VariableStatistics::default()
        };

        for var_type in &self.reverse {
            match var_type {
                VariableType::Digit { .. } => stats.digit_variables += 1,
                VariableType::Player { .. } => stats.player_variables += 1,
                VariableType::Box { .. } => stats.box_variables += 1,
            }
        }

        stats
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone, Default)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub digit_variables: usize,
    pub player_variables: usize,
    pub box_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        if self.digit_variables > 0 {
            writeln!(f, "  Digit variables: {}", self.digit_variables)?;
        }
        if self.player_variables > 0 || self.box_variables > 0 {
            writeln!(f, "  Player variables: {}", self.player_variables)?;
            writeln!(f, "  Box variables: {}", self.box_variables)?;
        }
        Ok(())
    }
}
