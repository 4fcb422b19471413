//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    last_result: Option<SolverResultType>,
    last_solve_time: Duration,
}

/// A satisfying assignment returned by a backend
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SolverSolution {
    /// Build a solution from signed literals, as a DIMACS model lists them
    pub fn from_literals(literals: impl IntoIterator<Item = i32>, solve_time: Duration) -> Self {
        let assignment = literals
            .into_iter()
            .filter(|&lit| lit != 0)
            .map(|lit| (lit.abs(), lit > 0))
            .collect();
        Self { assignment, solve_time }
    }

    /// Variables assigned true, in ascending order
    pub fn positive_literals(&self) -> Vec<i32> {
        let mut positives: Vec<i32> = self
            .assignment
            .iter()
            .filter(|(_, &value)| value)
            .map(|(&var, _)| var)
            .collect();
        positives.sort_unstable();
        positives
    }

    /// Unassigned variables count as false
    pub fn is_true(&self, var: i32) -> bool {
        self.assignment.get(&var).copied().unwrap_or(false)
    }
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
    pub result: SolverResultType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverResultType {
    NotSolved,
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl SatSolver {
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

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());

        self.clause_count += 1;
        Ok(())
    }

    /// Solve the SAT problem and return the model if satisfiable
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let result = self.solver.solve();
        self.last_solve_time = start_time.elapsed();

        match result {
            Some(true) => {
                self.last_result = Some(SolverResultType::Satisfiable);
                Ok(Some(SolverSolution {
                    assignment: self.extract_assignment(),
                    solve_time: self.last_solve_time,
                }))
            }
            Some(false) => {
                self.last_result = Some(SolverResultType::Unsatisfiable);
                Ok(None)
            }
            None => {
                self.last_result = Some(SolverResultType::Unknown);
                anyhow::bail!("CaDiCaL stopped without deciding satisfiability")
            }
        }
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
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

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Result: {:?}", self.result)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
        assert_eq!(solver.statistics().result, SolverResultType::NotSolved);
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();

        let solution = solver.solve().unwrap().expect("formula is satisfiable");
        assert!(solution.is_true(2));
        assert!(solution.positive_literals().contains(&2));
        assert_eq!(solver.statistics().result, SolverResultType::Satisfiable);
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        assert!(solver.solve().unwrap().is_none());
        assert_eq!(solver.statistics().result, SolverResultType::Unsatisfiable);
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = SatSolver::new();
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
        assert_eq!(solver.clause_count(), 2);
    }

    #[test]
    fn test_solution_from_literals() {
        let solution = SolverSolution::from_literals(vec![3, -1, 2, 0], Duration::ZERO);
        assert_eq!(solution.positive_literals(), vec![2, 3]);
        assert!(!solution.is_true(1));
        assert!(!solution.is_true(42));
    }
}
