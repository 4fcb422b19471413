//! Display and output formatting utilities

use crate::outcome::{ReportAnswer, SolveReport, SolveStatus};
use crate::sokoban::{Board, CellKind, Position, Snapshot, SokobanPlan};
use crate::sudoku::grid::{SudokuGrid, BLOCK_SIZE, SIZE};

/// Formats puzzles and answers for the console
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Grid with block separators
    pub fn format_sudoku(grid: &SudokuGrid) -> String {
        let mut output = String::new();
        for row in 0..SIZE {
            if row > 0 && row % BLOCK_SIZE == 0 {
                output.push_str("------+-------+------\n");
            }
            for col in 0..SIZE {
                if col > 0 && col % BLOCK_SIZE == 0 {
                    output.push_str("| ");
                }
                let digit = grid.get(row, col);
                output.push(if digit == 0 { '.' } else { (b'0' + digit) as char });
                if col + 1 < SIZE {
                    output.push(' ');
                }
            }
            output.push('\n');
        }
        output
    }

    /// Board with the entities of `snapshot` drawn on it
    pub fn format_snapshot(board: &Board, snapshot: &Snapshot) -> String {
        let mut output = String::with_capacity(board.rows * (board.cols + 1));
        for row in 0..board.rows {
            for col in 0..board.cols {
                let pos = Position::new(row, col);
                let goal = board.is_goal(pos);
                let ch = if pos == snapshot.player {
                    if goal { '+' } else { '@' }
                } else if snapshot.boxes.contains(&pos) {
                    if goal { '*' } else { '$' }
                } else {
                    match board.get(pos) {
                        CellKind::Wall => '#',
                        CellKind::Floor => ' ',
                        CellKind::Goal => '.',
                    }
                };
                output.push(ch);
            }
            output.push('\n');
        }
        output
    }

    /// Summary line plus, optionally, the board at every timestep
    pub fn format_plan(board: &Board, plan: &SokobanPlan, show_steps: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Plan ({} moves, horizon {}): {}\n",
            plan.len(),
            plan.horizon,
            if plan.is_empty() { "-".to_string() } else { plan.to_symbols() }
        ));

        if show_steps {
            for (t, snapshot) in plan.snapshots.iter().enumerate() {
                output.push_str(&format!("\nTimestep {}:\n", t));
                output.push_str(&Self::format_snapshot(board, snapshot));
            }
        }

        output
    }

    /// One table row per report
    pub fn format_report_summary(reports: &[SolveReport]) -> String {
        let mut output = String::new();

        output.push_str("Batch Summary:\n");
        output.push_str("File                     | Kind    | Status | Time(ms) | Answer\n");
        output.push_str("-------------------------|---------|--------|----------|----------\n");

        for report in reports {
            let status = match report.status {
                SolveStatus::Solved => "solved",
                SolveStatus::Unsatisfiable => "unsat",
            };
            let time = report
                .statistics
                .as_ref()
                .map_or(0, |s| s.solve_time.as_millis());
            let answer = match &report.answer {
                Some(ReportAnswer::Grid(_)) => "grid".to_string(),
                Some(ReportAnswer::Plan { moves, .. }) if moves.is_empty() => "-".to_string(),
                Some(ReportAnswer::Plan { moves, .. }) => moves.clone(),
                None => String::new(),
            };

            output.push_str(&format!(
                "{:24} | {:7} | {:6} | {:8} | {}\n",
                truncate(&report.source, 24),
                format!("{:?}", report.puzzle).to_lowercase(),
                status,
                time,
                answer
            ));
        }

        output
    }
}

/// Keep the tail of long names
fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        text.to_string()
    } else {
        let tail: String = text.chars().skip(count - width + 1).collect();
        format!("…{}", tail)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Honours `NO_COLOR` and `TERM=dumb`
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
