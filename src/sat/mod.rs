//! SAT solving components shared by both puzzle encodings

pub mod constraints;
pub mod solver;
pub mod solver_factory;
pub mod variables;
pub mod varisat_solver;

pub use constraints::{Clause, Formula};
pub use solver::{SatSolver, SolverResultType, SolverSolution, SolverStatistics};
pub use solver_factory::UnifiedSatSolver;
pub use variables::{VariableManager, VariableSpace, VariableType};
pub use varisat_solver::VarisatSatSolver;
