//! Explicit per-timestep state and the transition relation it obeys

use super::board::{Board, BoardState, Direction, Position};
use serde::{Deserialize, Serialize};

/// Player and box positions at one timestep
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Position,
    /// Indexed by box identity
    pub boxes: Vec<Position>,
}

/// What a single move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Walk,
    /// Pushed box `index` one cell along the move
    Push { index: usize },
}

impl Snapshot {
    pub fn initial(state: &BoardState) -> Self {
        Self {
            player: state.player,
            boxes: state.boxes.clone(),
        }
    }

    pub fn box_at(&self, pos: Position) -> Option<usize> {
        self.boxes.iter().position(|&b| b == pos)
    }

    /// Apply one move. Returns `None` when the player would walk off the
    /// board or into a wall, or push a box into a wall, another box or off
    /// the board.
    pub fn step(&self, board: &Board, direction: Direction) -> Option<(Snapshot, StepKind)> {
        let target = board.neighbour(self.player, direction)?;
        if board.is_wall(target) {
            return None;
        }

        let Some(index) = self.box_at(target) else {
            return Some((
                Snapshot {
                    player: target,
                    boxes: self.boxes.clone(),
                },
                StepKind::Walk,
            ));
        };

        let beyond = board.neighbour(target, direction)?;
        if board.is_wall(beyond) || self.box_at(beyond).is_some() {
            return None;
        }

        let mut boxes = self.boxes.clone();
        boxes[index] = beyond;
        Some((Snapshot { player: target, boxes }, StepKind::Push { index }))
    }

    /// Every box stands on a goal
    pub fn is_solved(&self, board: &Board) -> bool {
        self.boxes.iter().all(|&b| board.is_goal(b))
    }
}
