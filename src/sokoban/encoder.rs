//! Time-unrolled SAT encoding of a Sokoban board
//!
//! Timesteps run 0..=horizon. Each timestep holds one `Snapshot` worth of
//! variables: `Player { row, col, t }` and `Box { index, row, col, t }`.
//! The clause families are
//!
//! * state: initial positions, presence, single occupancy, box overlap,
//!   player/box exclusivity, wall exclusion, dead squares
//! * transition (t < horizon): player movement, box persistence, push
//!   causality, push necessity
//! * goal: every box ends on a goal at the horizon
//!
//! Exclusion families range over passable cells only; wall cells are
//! removed outright by unit clauses.

use super::board::{BoardState, Direction, Position};
use crate::error::Result;
use crate::sat::constraints::{
    at_least_one, at_most_one, forbid, forbid_all, implies_any, Clause, Formula,
};
use crate::sat::{VariableManager, VariableSpace};

/// A movable thing on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Player,
    Box(usize),
}

/// Generates the CNF formula for one board and horizon
pub struct SokobanEncoder {
    state: BoardState,
    horizon: usize,
    dead_square_pruning: bool,
    variable_manager: VariableManager,
    passable: Vec<Position>,
}

impl SokobanEncoder {
    /// Fails with `VariableSpaceExhausted` when the board, box count and
    /// horizon cannot be addressed by solver literals
    pub fn new(state: &BoardState, horizon: usize, dead_square_pruning: bool) -> Result<Self> {
        let space = VariableSpace::Sokoban {
            rows: state.board.rows,
            cols: state.board.cols,
            horizon,
            boxes: state.boxes.len(),
        };

        Ok(Self {
            state: state.clone(),
            horizon,
            dead_square_pruning,
            variable_manager: VariableManager::new(space)?,
            passable: state.board.passable_positions(),
        })
    }

    /// Generate every clause family
    pub fn encode(&mut self) -> Result<Formula> {
        let mut formula = Formula::new();

        formula.extend(self.initial_state_clauses()?);
        formula.extend(self.wall_clauses()?);

        for t in 0..=self.horizon {
            formula.extend(self.presence_clauses(t)?);
            formula.extend(self.single_occupancy_clauses(t)?);
            formula.extend(self.box_overlap_clauses(t)?);
            formula.extend(self.exclusivity_clauses(t)?);
            if self.dead_square_pruning {
                formula.extend(self.dead_square_clauses(t)?);
            }
        }

        for t in 0..self.horizon {
            formula.extend(self.movement_clauses(t)?);
            formula.extend(self.persistence_clauses(t)?);
            formula.extend(self.push_causality_clauses(t)?);
            formula.extend(self.push_necessity_clauses(t)?);
        }

        formula.extend(self.goal_clauses()?);

        Ok(formula)
    }

    fn var(&mut self, entity: Entity, pos: Position, t: usize) -> Result<i32> {
        match entity {
            Entity::Player => self.variable_manager.player_variable(pos.row, pos.col, t),
            Entity::Box(index) => self.variable_manager.box_variable(index, pos.row, pos.col, t),
        }
    }

    fn entities(&self) -> Vec<Entity> {
        std::iter::once(Entity::Player)
            .chain((0..self.state.boxes.len()).map(Entity::Box))
            .collect()
    }

    fn box_indices(&self) -> std::ops::Range<usize> {
        0..self.state.boxes.len()
    }

    /// Variables for `entity` over all passable cells at `t`
    fn passable_vars(&mut self, entity: Entity, t: usize) -> Result<Vec<i32>> {
        let cells = self.passable.clone();
        cells.into_iter().map(|pos| self.var(entity, pos, t)).collect()
    }

    fn initial_state_clauses(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = vec![Clause::unit(self.var(Entity::Player, self.state.player, 0)?)];
        for (index, pos) in self.state.boxes.clone().into_iter().enumerate() {
            clauses.push(Clause::unit(self.var(Entity::Box(index), pos, 0)?));
        }
        Ok(clauses)
    }

    /// No entity ever stands on a wall
    fn wall_clauses(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for pos in self.state.board.wall_positions() {
            for entity in self.entities() {
                for t in 0..=self.horizon {
                    clauses.push(forbid(self.var(entity, pos, t)?));
                }
            }
        }
        Ok(clauses)
    }

    fn presence_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for entity in self.entities() {
            clauses.push(at_least_one(&self.passable_vars(entity, t)?));
        }
        Ok(clauses)
    }

    fn single_occupancy_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for entity in self.entities() {
            clauses.extend(at_most_one(&self.passable_vars(entity, t)?));
        }
        Ok(clauses)
    }

    /// Two boxes never share a cell
    fn box_overlap_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        if self.state.boxes.len() < 2 {
            return Ok(clauses);
        }
        for pos in self.passable.clone() {
            let vars = self
                .box_indices()
                .map(|index| self.var(Entity::Box(index), pos, t))
                .collect::<Result<Vec<_>>>()?;
            clauses.extend(at_most_one(&vars));
        }
        Ok(clauses)
    }

    /// The player never shares a cell with a box
    fn exclusivity_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for pos in self.passable.clone() {
            let player = self.var(Entity::Player, pos, t)?;
            for index in self.box_indices() {
                let box_var = self.var(Entity::Box(index), pos, t)?;
                clauses.push(forbid_all(&[player, box_var]));
            }
        }
        Ok(clauses)
    }

    fn dead_square_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for pos in self.state.board.dead_squares() {
            for index in self.box_indices() {
                clauses.push(forbid(self.var(Entity::Box(index), pos, t)?));
            }
        }
        Ok(clauses)
    }

    /// The player stays put or steps to a passable neighbour
    fn movement_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for pos in self.passable.clone() {
            let here = self.var(Entity::Player, pos, t)?;
            let mut next = vec![self.var(Entity::Player, pos, t + 1)?];
            for neighbour in self.state.board.passable_neighbours(pos) {
                next.push(self.var(Entity::Player, neighbour, t + 1)?);
            }
            clauses.push(implies_any(&[here], &next));
        }
        Ok(clauses)
    }

    /// A box at t+1 was at the same cell or an adjacent one at t
    fn persistence_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for index in self.box_indices() {
            for pos in self.passable.clone() {
                let after = self.var(Entity::Box(index), pos, t + 1)?;
                let mut before = vec![self.var(Entity::Box(index), pos, t)?];
                for neighbour in self.state.board.passable_neighbours(pos) {
                    before.push(self.var(Entity::Box(index), neighbour, t)?);
                }
                clauses.push(implies_any(&[after], &before));
            }
        }
        Ok(clauses)
    }

    /// A box that moves from `c` to `c + d` was pushed: the player stood at
    /// `c - d` at t and stands on `c` at t+1. With no cell to push from, the
    /// move is forbidden.
    fn push_causality_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let board = self.state.board.clone();

        for index in self.box_indices() {
            for pos in self.passable.clone() {
                for direction in Direction::ALL {
                    let Some(target) = board.neighbour(pos, direction) else {
                        continue;
                    };
                    if !board.is_passable(target) {
                        continue;
                    }

                    let moved = [
                        self.var(Entity::Box(index), pos, t)?,
                        self.var(Entity::Box(index), target, t + 1)?,
                    ];

                    match board
                        .neighbour(pos, direction.opposite())
                        .filter(|&p| board.is_passable(p))
                    {
                        Some(pusher) => {
                            let behind = self.var(Entity::Player, pusher, t)?;
                            let into = self.var(Entity::Player, pos, t + 1)?;
                            clauses.push(implies_any(&moved, &[behind]));
                            clauses.push(implies_any(&moved, &[into]));
                        }
                        None => clauses.push(forbid_all(&moved)),
                    }
                }
            }
        }

        Ok(clauses)
    }

    /// A box that stays put is not walked into from behind
    fn push_necessity_clauses(&mut self, t: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let board = self.state.board.clone();

        for index in self.box_indices() {
            for pos in self.passable.clone() {
                for direction in Direction::ALL {
                    let Some(pusher) = board
                        .neighbour(pos, direction.opposite())
                        .filter(|&p| board.is_passable(p))
                    else {
                        continue;
                    };

                    clauses.push(forbid_all(&[
                        self.var(Entity::Box(index), pos, t)?,
                        self.var(Entity::Box(index), pos, t + 1)?,
                        self.var(Entity::Player, pusher, t)?,
                        self.var(Entity::Player, pos, t + 1)?,
                    ]));
                }
            }
        }

        Ok(clauses)
    }

    /// Every box stands on some goal at the horizon. A board with boxes but
    /// no goals yields an empty clause.
    fn goal_clauses(&mut self) -> Result<Vec<Clause>> {
        let goals = self.state.board.goals();
        let mut clauses = Vec::new();
        for index in self.box_indices() {
            let mut vars = Vec::with_capacity(goals.len());
            for &goal in &goals {
                vars.push(self.var(Entity::Box(index), goal, self.horizon)?);
            }
            clauses.push(at_least_one(&vars));
        }
        Ok(clauses)
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn variable_manager(&self) -> &VariableManager {
        &self.variable_manager
    }
}
