//! File I/O for puzzles and reports

use crate::outcome::{PuzzleKind, SolveReport};
use crate::sokoban::BoardState;
use crate::sudoku::SudokuGrid;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const SUDOKU_EXTENSION: &str = "sudoku";
pub const SOKOBAN_EXTENSION: &str = "sokoban";

/// Load a Sudoku grid from a text file
pub fn load_sudoku_from_file<P: AsRef<Path>>(path: P) -> Result<SudokuGrid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Sudoku file: {}", path.display()))?;

    SudokuGrid::parse(&content)
        .with_context(|| format!("Failed to parse Sudoku grid from file: {}", path.display()))
}

/// Load a Sokoban board from a text file
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<BoardState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file: {}", path.display()))?;

    BoardState::parse(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.display()))
}

/// Puzzle type implied by a file extension
pub fn puzzle_kind<P: AsRef<Path>>(path: P) -> Option<PuzzleKind> {
    match path.as_ref().extension()?.to_str()? {
        SUDOKU_EXTENSION => Some(PuzzleKind::Sudoku),
        SOKOBAN_EXTENSION => Some(PuzzleKind::Sokoban),
        _ => None,
    }
}

/// All `*.sudoku` and `*.sokoban` files directly inside `dir`, sorted by name
pub fn find_puzzle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && puzzle_kind(&path).is_some() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Write `report` as pretty JSON into `output_dir`, returning the file path
pub fn save_report<P: AsRef<Path>>(report: &SolveReport, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let path = output_dir.join(report.file_name());
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path)
}

/// Write a set of example puzzles into `output_dir`
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        (
            "classic.sudoku",
            "53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n7...2...6\n.6....28.\n...419..5\n....8..79\n",
        ),
        (
            "one_blank.sudoku",
            "534678912\n672195348\n198342567\n859761423\n426853791\n713924856\n961537284\n287419635\n34528617.\n",
        ),
        ("push.sokoban", "#####\n#PBG#\n#####\n"),
        ("corridor.sokoban", "#######\n#P.B.G#\n#######\n"),
        ("room.sokoban", "#####\n#P..#\n#.B.#\n#...#\n#.G.#\n#####\n"),
    ];

    let mut written = Vec::with_capacity(examples.len());
    for (name, content) in examples {
        let path = dir.join(name);
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", name))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::outcome::ReportAnswer;
    use tempfile::tempdir;

    #[test]
    fn test_examples_load_back() {
        let temp_dir = tempdir().unwrap();
        let written = create_example_puzzles(temp_dir.path()).unwrap();
        assert_eq!(written.len(), 5);

        let found = find_puzzle_files(temp_dir.path()).unwrap();
        assert_eq!(found.len(), 5);

        for path in found {
            match puzzle_kind(&path).unwrap() {
                PuzzleKind::Sudoku => {
                    load_sudoku_from_file(&path).unwrap();
                }
                PuzzleKind::Sokoban => {
                    load_board_from_file(&path).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_find_ignores_other_files() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(temp_dir.path().join("b.sokoban"), "P").unwrap();
        std::fs::write(temp_dir.path().join("a.sudoku"), "").unwrap();

        let found = find_puzzle_files(temp_dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.sudoku", "b.sokoban"]);
    }

    #[test]
    fn test_parse_error_keeps_puzzle_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.sokoban");
        std::fs::write(&path, "#####\n#.B.#\n#####\n").unwrap();

        let err = load_board_from_file(&path).unwrap_err();
        assert_eq!(err.downcast_ref::<PuzzleError>(), Some(&PuzzleError::PlayerCount(0)));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(load_sudoku_from_file(temp_dir.path().join("absent.sudoku")).is_err());
    }

    #[test]
    fn test_save_report() {
        let temp_dir = tempdir().unwrap();
        let report = SolveReport::new(
            "boards/push.sokoban",
            PuzzleKind::Sokoban,
            Some(ReportAnswer::Plan { moves: "R".to_string(), length: 1 }),
            None,
        );

        let path = save_report(&report, temp_dir.path().join("out")).unwrap();
        assert!(path.ends_with("push_report.json"));

        let content = std::fs::read_to_string(path).unwrap();
        let loaded: SolveReport = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, report);
    }
}
