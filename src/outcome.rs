//! Solve outcomes and serializable reports

use crate::config::SolverBackend;
use crate::sat::SolverStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Result of a well-formed solve: an answer, or proof that none exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome<T> {
    Solved(T),
    Unsatisfiable,
}

impl<T> SolveOutcome<T> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&T> {
        match self {
            SolveOutcome::Solved(answer) => Some(answer),
            SolveOutcome::Unsatisfiable => None,
        }
    }

    pub fn into_solution(self) -> Option<T> {
        match self {
            SolveOutcome::Solved(answer) => Some(answer),
            SolveOutcome::Unsatisfiable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SolveOutcome<U> {
        match self {
            SolveOutcome::Solved(answer) => SolveOutcome::Solved(f(answer)),
            SolveOutcome::Unsatisfiable => SolveOutcome::Unsatisfiable,
        }
    }
}

/// Size of one encoded formula and how long the backend took on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingStatistics {
    pub backend: SolverBackend,
    pub variables: usize,
    pub clauses: usize,
    /// Sokoban only
    pub horizon: Option<usize>,
    #[serde(with = "duration_millis")]
    pub solve_time: Duration,
}

impl EncodingStatistics {
    pub fn from_solver(
        backend: SolverBackend,
        variables: usize,
        clauses: usize,
        horizon: Option<usize>,
        solver: &SolverStatistics,
    ) -> Self {
        Self {
            backend,
            variables,
            clauses,
            horizon,
            solve_time: solver.solve_time,
        }
    }

    /// Statistics for a formula that was rejected before reaching a solver
    pub fn unsolved(backend: SolverBackend, variables: usize, clauses: usize, horizon: Option<usize>) -> Self {
        Self {
            backend,
            variables,
            clauses,
            horizon,
            solve_time: Duration::ZERO,
        }
    }
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Backend: {:?}", self.backend)?;
        if let Some(horizon) = self.horizon {
            writeln!(f, "  Horizon: {}", horizon)?;
        }
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clauses: {}", self.clauses)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(millis.max(0.0) / 1000.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Sudoku,
    Sokoban,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    Unsatisfiable,
}

/// The answer part of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAnswer {
    Grid(Vec<Vec<u8>>),
    Plan { moves: String, length: usize },
}

/// Machine-readable summary of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub source: String,
    pub puzzle: PuzzleKind,
    pub status: SolveStatus,
    pub answer: Option<ReportAnswer>,
    pub statistics: Option<EncodingStatistics>,
}

impl SolveReport {
    pub fn new(
        source: impl Into<String>,
        puzzle: PuzzleKind,
        answer: Option<ReportAnswer>,
        statistics: Option<EncodingStatistics>,
    ) -> Self {
        let status = if answer.is_some() {
            SolveStatus::Solved
        } else {
            SolveStatus::Unsatisfiable
        };
        Self {
            source: source.into(),
            puzzle,
            status,
            answer,
            statistics,
        }
    }

    /// Default file name for this report inside an output directory
    pub fn file_name(&self) -> String {
        let stem = Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("puzzle");
        format!("{}_report.json", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let solved: SolveOutcome<u32> = SolveOutcome::Solved(3);
        assert!(solved.is_solved());
        assert_eq!(solved.solution(), Some(&3));
        assert_eq!(solved.map(|v| v * 2), SolveOutcome::Solved(6));

        let unsat: SolveOutcome<u32> = SolveOutcome::Unsatisfiable;
        assert!(!unsat.is_solved());
        assert_eq!(unsat.into_solution(), None);
    }

    #[test]
    fn test_report_status_follows_answer() {
        let report = SolveReport::new(
            "puzzles/corridor.sokoban",
            PuzzleKind::Sokoban,
            Some(ReportAnswer::Plan { moves: "RRR".to_string(), length: 3 }),
            None,
        );
        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.file_name(), "corridor_report.json");

        let report = SolveReport::new("x.sudoku", PuzzleKind::Sudoku, None, None);
        assert_eq!(report.status, SolveStatus::Unsatisfiable);
    }

    #[test]
    fn test_report_json_shape() {
        let stats = EncodingStatistics {
            backend: SolverBackend::Cadical,
            variables: 729,
            clauses: 3159,
            horizon: None,
            solve_time: Duration::from_millis(12),
        };
        let report = SolveReport::new(
            "grid.sudoku",
            PuzzleKind::Sudoku,
            Some(ReportAnswer::Grid(vec![vec![1, 2], vec![3, 4]])),
            Some(stats),
        );

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "solved");
        assert_eq!(json["puzzle"], "sudoku");
        assert_eq!(json["answer"]["grid"][1][0], 3);
        assert_eq!(json["statistics"]["backend"], "cadical");
        assert_eq!(json["statistics"]["solve_time"], 12.0);

        let back: SolveReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.answer, report.answer);
    }
}
