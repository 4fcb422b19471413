//! Recover snapshots and a move sequence from a solver model

use super::board::{Direction, Position};
use super::state::Snapshot;
use crate::error::{PuzzleError, Result};
use crate::sat::{SolverSolution, VariableManager, VariableSpace, VariableType};

/// Rebuild the snapshot of every timestep 0..=horizon.
///
/// Each entity must be asserted at exactly one cell per timestep.
pub fn decode_snapshots(
    solution: &SolverSolution,
    variable_manager: &VariableManager,
) -> Result<Vec<Snapshot>> {
    let VariableSpace::Sokoban { horizon, boxes, .. } = variable_manager.space() else {
        return Err(PuzzleError::VariableOutOfBounds(
            "Sokoban decoding needs a Sokoban variable space".to_string(),
        ));
    };

    let mut players: Vec<Vec<Position>> = vec![Vec::new(); horizon + 1];
    let mut box_cells: Vec<Vec<Vec<Position>>> = vec![vec![Vec::new(); boxes]; horizon + 1];

    for literal in solution.positive_literals() {
        match variable_manager.lookup(literal) {
            Some(VariableType::Player { row, col, t }) => players[t].push(Position::new(row, col)),
            Some(VariableType::Box { index, row, col, t }) => {
                box_cells[t][index].push(Position::new(row, col))
            }
            _ => {}
        }
    }

    let mut snapshots = Vec::with_capacity(horizon + 1);
    for t in 0..=horizon {
        let player = single_position(&players[t], "player", t)?;
        let boxes = box_cells[t]
            .iter()
            .enumerate()
            .map(|(index, cells)| single_position(cells, &format!("box {}", index), t))
            .collect::<Result<Vec<_>>>()?;
        snapshots.push(Snapshot { player, boxes });
    }

    Ok(snapshots)
}

fn single_position(cells: &[Position], entity: &str, t: usize) -> Result<Position> {
    match cells {
        [pos] => Ok(*pos),
        [] => Err(PuzzleError::MissingEntity { entity: entity.to_string(), t }),
        _ => Err(PuzzleError::AmbiguousEntity { entity: entity.to_string(), t }),
    }
}

/// Map consecutive player positions to moves. A timestep where the player
/// stays put contributes no move; any delta that is not a unit step is an
/// `IllegalStep`.
pub fn moves_from_snapshots(snapshots: &[Snapshot]) -> Result<Vec<Direction>> {
    let mut moves = Vec::new();

    for (t, pair) in snapshots.windows(2).enumerate() {
        let (from, to) = (pair[0].player, pair[1].player);
        if from == to {
            continue;
        }

        let delta = (
            to.row as isize - from.row as isize,
            to.col as isize - from.col as isize,
        );
        match Direction::from_delta(delta) {
            Some(direction) => moves.push(direction),
            None => {
                return Err(PuzzleError::IllegalStep {
                    t,
                    from_row: from.row,
                    from_col: from.col,
                    to_row: to.row,
                    to_col: to.col,
                })
            }
        }
    }

    Ok(moves)
}

/// Decode a model straight to its snapshots and moves
pub fn decode(
    solution: &SolverSolution,
    variable_manager: &VariableManager,
) -> Result<(Vec<Snapshot>, Vec<Direction>)> {
    let snapshots = decode_snapshots(solution, variable_manager)?;
    let moves = moves_from_snapshots(&snapshots)?;
    Ok((snapshots, moves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn manager(horizon: usize, boxes: usize) -> VariableManager {
        VariableManager::new(VariableSpace::Sokoban { rows: 3, cols: 5, horizon, boxes }).unwrap()
    }

    fn snapshot(player: (usize, usize), boxes: &[(usize, usize)]) -> Snapshot {
        Snapshot {
            player: Position::new(player.0, player.1),
            boxes: boxes.iter().map(|&(r, c)| Position::new(r, c)).collect(),
        }
    }

    #[test]
    fn test_decode_push() {
        let mut vm = manager(1, 1);
        let literals = vec![
            vm.player_variable(1, 1, 0).unwrap(),
            vm.box_variable(0, 1, 2, 0).unwrap(),
            vm.player_variable(1, 2, 1).unwrap(),
            vm.box_variable(0, 1, 3, 1).unwrap(),
            -vm.player_variable(1, 3, 1).unwrap(),
        ];
        let solution = SolverSolution::from_literals(literals, Duration::ZERO);

        let (snapshots, moves) = decode(&solution, &vm).unwrap();
        assert_eq!(snapshots, vec![snapshot((1, 1), &[(1, 2)]), snapshot((1, 2), &[(1, 3)])]);
        assert_eq!(moves, vec![Direction::Right]);
    }

    #[test]
    fn test_missing_and_ambiguous_entities() {
        let mut vm = manager(1, 1);
        let literals = vec![
            vm.player_variable(1, 1, 0).unwrap(),
            vm.box_variable(0, 1, 2, 0).unwrap(),
            vm.box_variable(0, 1, 2, 1).unwrap(),
        ];
        let solution = SolverSolution::from_literals(literals, Duration::ZERO);
        assert_eq!(
            decode_snapshots(&solution, &vm),
            Err(PuzzleError::MissingEntity { entity: "player".to_string(), t: 1 })
        );

        let mut vm = manager(0, 1);
        let literals = vec![
            vm.player_variable(1, 1, 0).unwrap(),
            vm.box_variable(0, 1, 2, 0).unwrap(),
            vm.box_variable(0, 1, 3, 0).unwrap(),
        ];
        let solution = SolverSolution::from_literals(literals, Duration::ZERO);
        assert_eq!(
            decode_snapshots(&solution, &vm),
            Err(PuzzleError::AmbiguousEntity { entity: "box 0".to_string(), t: 0 })
        );
    }

    #[test]
    fn test_waiting_is_skipped() {
        let snapshots = vec![
            snapshot((1, 1), &[]),
            snapshot((1, 1), &[]),
            snapshot((1, 2), &[]),
            snapshot((2, 2), &[]),
        ];
        assert_eq!(
            moves_from_snapshots(&snapshots).unwrap(),
            vec![Direction::Right, Direction::Down]
        );
    }

    #[test]
    fn test_illegal_step_is_reported() {
        let snapshots = vec![snapshot((1, 1), &[]), snapshot((1, 2), &[]), snapshot((2, 3), &[])];
        let err = moves_from_snapshots(&snapshots).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::IllegalStep { t: 1, from_row: 1, from_col: 2, to_row: 2, to_col: 3 }
        );
        assert!(err.is_decode_inconsistency());
    }

    #[test]
    fn test_sudoku_space_is_rejected() {
        let vm = VariableManager::new(VariableSpace::Sudoku).unwrap();
        let solution = SolverSolution::from_literals(Vec::new(), Duration::ZERO);
        assert!(decode_snapshots(&solution, &vm).is_err());
    }
}
