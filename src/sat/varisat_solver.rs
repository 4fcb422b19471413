//! Varisat SAT solver integration

use super::constraints::Clause;
use super::solver::{SolverResultType, SolverSolution, SolverStatistics};
use anyhow::Result;
use std::time::{Duration, Instant};
use varisat::{ExtendFormula, Lit, Solver};

/// SAT solver wrapper for Varisat
pub struct VarisatSatSolver {
    solver: Solver<'static>,
    variable_count: usize,
    clause_count: usize,
    last_result: Option<SolverResultType>,
    last_solve_time: Duration,
}

impl VarisatSatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            last_result: None,
            last_solve_time: Duration::ZERO,
        }
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        let literals: Vec<Lit> = clause
            .literals
            .iter()
            .map(|&lit| Lit::from_dimacs(lit as isize))
            .collect();

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(&literals);
        self.clause_count += 1;
        Ok(())
    }

    /// Solve the SAT problem and return the model if satisfiable
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let satisfiable = self
            .solver
            .solve()
            .map_err(|e| anyhow::anyhow!("Varisat solver error: {}", e))?;
        self.last_solve_time = start_time.elapsed();

        if !satisfiable {
            self.last_result = Some(SolverResultType::Unsatisfiable);
            return Ok(None);
        }

        self.last_result = Some(SolverResultType::Satisfiable);
        let model = self
            .solver
            .model()
            .ok_or_else(|| anyhow::anyhow!("Varisat reported SAT without a model"))?;

        Ok(Some(SolverSolution::from_literals(
            model.iter().map(|lit| lit.to_dimacs() as i32),
            self.last_solve_time,
        )))
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            solve_time: self.last_solve_time,
            result: self.last_result.unwrap_or(SolverResultType::NotSolved),
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for VarisatSatSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsatisfiable() {
        let mut solver = VarisatSatSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2, ¬x2
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();
        solver.add_clause(&Clause::unit(-2)).unwrap();

        assert!(solver.solve().unwrap().is_none());
        assert_eq!(solver.statistics().result, SolverResultType::Unsatisfiable);
    }

    #[test]
    fn test_model_satisfies_clauses() {
        let mut solver = VarisatSatSolver::new();
        let clauses = vec![
            Clause::new(vec![1, 2, 3]),
            Clause::binary(-1, -2),
            Clause::binary(-2, -3),
            Clause::unit(-1),
        ];
        solver.add_clauses(&clauses).unwrap();

        let solution = solver.solve().unwrap().expect("formula is satisfiable");
        for clause in &clauses {
            assert!(clause.is_satisfied_by(|v| solution.is_true(v)));
        }
        assert_eq!(solver.statistics().result, SolverResultType::Satisfiable);
        assert_eq!(solver.variable_count(), 3);
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = VarisatSatSolver::new();
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
    }
}
