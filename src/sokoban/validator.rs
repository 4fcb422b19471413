//! Replay a move sequence against the initial board

use super::board::{format_moves, BoardState, Direction};
use super::state::{Snapshot, StepKind};
use anyhow::Result;
use std::fmt;

/// Result of replaying a plan
#[derive(Debug, Clone)]
pub struct PlanValidation {
    /// Snapshots after each accepted move, starting with the initial one
    pub path: Vec<Snapshot>,
    pub pushes: usize,
    /// Index of the first move that could not be played
    pub blocked_at: Option<usize>,
    /// Every box on a goal after the last accepted move
    pub solved: bool,
    pub moves: Vec<Direction>,
}

impl PlanValidation {
    /// Every move was legal and the plan ends solved
    pub fn is_valid(&self) -> bool {
        self.blocked_at.is_none() && self.solved
    }

    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.path.last()
    }
}

impl fmt::Display for PlanValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan: {}", format_moves(&self.moves))?;
        writeln!(f, "Moves: {}, pushes: {}", self.moves.len(), self.pushes)?;
        if let Some(index) = self.blocked_at {
            writeln!(f, "Move {} ({}) is illegal", index + 1, self.moves[index])?;
        }
        writeln!(f, "Solved: {}", if self.solved { "yes" } else { "no" })
    }
}

pub struct PlanValidator;

impl PlanValidator {
    /// Play `moves` from the initial state, stopping at the first illegal one
    pub fn validate(state: &BoardState, moves: &[Direction]) -> PlanValidation {
        let mut current = Snapshot::initial(state);
        let mut path = vec![current.clone()];
        let mut pushes = 0;
        let mut blocked_at = None;

        for (index, &direction) in moves.iter().enumerate() {
            match current.step(&state.board, direction) {
                Some((next, kind)) => {
                    if let StepKind::Push { .. } = kind {
                        pushes += 1;
                    }
                    path.push(next.clone());
                    current = next;
                }
                None => {
                    blocked_at = Some(index);
                    break;
                }
            }
        }

        PlanValidation {
            solved: current.is_solved(&state.board),
            path,
            pushes,
            blocked_at,
            moves: moves.to_vec(),
        }
    }
}

/// Parse a `UDLR` move string; whitespace and commas are ignored
pub fn parse_moves(text: &str) -> Result<Vec<Direction>> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .enumerate()
        .map(|(index, symbol)| {
            Direction::from_symbol(symbol).ok_or_else(|| {
                anyhow::anyhow!("Invalid move '{}' at position {}; expected U, D, L or R", symbol, index)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "#######\n#P.B.G#\n#######\n";

    #[test]
    fn test_valid_plan() {
        let state = BoardState::parse(CORRIDOR).unwrap();
        let moves = parse_moves("RRR").unwrap();

        let result = PlanValidator::validate(&state, &moves);
        assert!(result.is_valid(), "{}", result);
        assert_eq!(result.pushes, 2);
        assert_eq!(result.path.len(), 4);
    }

    #[test]
    fn test_short_plan_is_not_solved() {
        let state = BoardState::parse(CORRIDOR).unwrap();
        let result = PlanValidator::validate(&state, &parse_moves("RR").unwrap());
        assert!(!result.solved);
        assert!(result.blocked_at.is_none());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_blocked_move_stops_replay() {
        let state = BoardState::parse(CORRIDOR).unwrap();
        let result = PlanValidator::validate(&state, &parse_moves("URRR").unwrap());
        assert_eq!(result.blocked_at, Some(0));
        assert_eq!(result.path.len(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_moves("r, d u\nL").unwrap(),
            vec![Direction::Right, Direction::Down, Direction::Up, Direction::Left]
        );
        assert!(parse_moves("RX").is_err());
        assert!(parse_moves("").unwrap().is_empty());
    }
}
