//! Sokoban problem definition: bounded-horizon planning through SAT

use super::board::{format_moves, BoardState, Direction};
use super::decoder::decode;
use super::encoder::SokobanEncoder;
use super::state::Snapshot;
use super::validator::PlanValidator;
use crate::config::Settings;
use crate::outcome::{EncodingStatistics, SolveOutcome};
use crate::sat::UnifiedSatSolver;
use anyhow::{Context, Result};

/// A plan found within some horizon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SokobanPlan {
    pub moves: Vec<Direction>,
    /// One snapshot per timestep 0..=horizon, waits included
    pub snapshots: Vec<Snapshot>,
    pub horizon: usize,
}

impl SokobanPlan {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves as `UDLR` symbols
    pub fn to_symbols(&self) -> String {
        format_moves(&self.moves)
    }
}

/// One board bound to the settings it is solved with
pub struct SokobanProblem {
    settings: Settings,
    state: BoardState,
    statistics: Option<EncodingStatistics>,
}

impl SokobanProblem {
    pub fn new(settings: Settings, state: BoardState) -> Self {
        Self {
            settings,
            state,
            statistics: None,
        }
    }

    /// Look for a plan of at most `horizon` moves
    pub fn solve(&mut self, horizon: usize) -> Result<SolveOutcome<SokobanPlan>> {
        let backend = self.settings.solver.backend;

        let mut encoder =
            SokobanEncoder::new(&self.state, horizon, self.settings.sokoban.dead_square_pruning)
                .with_context(|| format!("Cannot encode board with horizon {}", horizon))?;
        let formula = encoder
            .encode()
            .with_context(|| format!("Failed to encode board with horizon {}", horizon))?;
        let variables = encoder.variable_manager().variable_count();

        // Boxes without goals: the formula holds an empty clause
        if formula.has_empty_clause() {
            self.statistics = Some(EncodingStatistics::unsolved(
                backend,
                variables,
                formula.len(),
                Some(horizon),
            ));
            return Ok(SolveOutcome::Unsatisfiable);
        }

        let mut solver = UnifiedSatSolver::new(backend);
        solver
            .add_clauses(formula.clauses())
            .context("Failed to add Sokoban clauses to the solver")?;

        let model = solver.solve().context("SAT solving failed")?;

        self.statistics = Some(EncodingStatistics::from_solver(
            backend,
            variables,
            formula.len(),
            Some(horizon),
            &solver.statistics(),
        ));

        let Some(model) = model else {
            return Ok(SolveOutcome::Unsatisfiable);
        };

        let (snapshots, moves) = decode(&model, encoder.variable_manager())
            .context("Solver model does not decode to a plan")?;

        let validation = PlanValidator::validate(&self.state, &moves);
        if !validation.is_valid() {
            anyhow::bail!("Decoded plan does not solve the board:\n{}", validation);
        }

        Ok(SolveOutcome::Solved(SokobanPlan {
            moves,
            snapshots,
            horizon,
        }))
    }

    /// Try horizons 0, 1, ..., `max_horizon` and return the first plan found,
    /// which is a shortest one
    pub fn solve_minimal(&mut self, max_horizon: usize) -> Result<SolveOutcome<SokobanPlan>> {
        for horizon in 0..=max_horizon {
            if let SolveOutcome::Solved(plan) = self.solve(horizon)? {
                return Ok(SolveOutcome::Solved(plan));
            }
        }
        Ok(SolveOutcome::Unsatisfiable)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Statistics of the most recent single-horizon solve
    pub fn statistics(&self) -> Option<&EncodingStatistics> {
        self.statistics.as_ref()
    }
}

/// Solve a board within `horizon` moves
pub fn solve_sokoban(
    state: &BoardState,
    horizon: usize,
    settings: &Settings,
) -> Result<SolveOutcome<SokobanPlan>> {
    SokobanProblem::new(settings.clone(), state.clone()).solve(horizon)
}
