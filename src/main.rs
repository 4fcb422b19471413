//! Command line front end for the puzzle SAT solvers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use puzzle_sat::{
    config::{CliOverrides, OutputFormat, Settings, SolverBackend},
    io::{create_example_puzzles, find_puzzle_files, load_board_from_file, load_sudoku_from_file, save_report},
    outcome::{PuzzleKind, ReportAnswer, SolveOutcome, SolveReport},
    sokoban::{parse_moves, PlanValidator, SokobanProblem},
    sudoku::{SudokuGrid, SudokuProblem},
    solve_batch,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "puzzle_sat")]
#[command(about = "Sudoku and Sokoban solved through SAT")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every solving command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// SAT backend (overrides config)
    #[arg(short, long, value_enum)]
    backend: Option<SolverBackend>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Directory for JSON reports (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a 9x9 Sudoku
    Sudoku {
        /// Puzzle file: nine lines of digits, '.' or '0' for blanks
        #[arg(short, long)]
        puzzle: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Plan a Sokoban solution within a horizon
    Sokoban {
        /// Board file using # . P B G * +
        #[arg(long)]
        board: PathBuf,

        /// Maximum number of moves (overrides config)
        #[arg(short = 't', long)]
        horizon: Option<usize>,

        /// Search horizons 0, 1, ... up to the horizon for a shortest plan
        #[arg(short, long)]
        minimize: bool,

        /// Print the board at every timestep
        #[arg(long)]
        show_steps: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Solve every *.sudoku and *.sokoban file in a directory in parallel
    Batch {
        /// Directory containing puzzle files
        #[arg(short, long)]
        dir: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Replay a move sequence against a board
    CheckPlan {
        /// Board file
        #[arg(long)]
        board: PathBuf,

        /// Moves as U, D, L, R symbols, e.g. "RRD"
        #[arg(short, long)]
        moves: String,

        /// Print the board after every move
        #[arg(long)]
        show_steps: bool,
    },

    /// Create a default configuration and example puzzles
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sudoku { puzzle, common } => sudoku_command(puzzle, common),
        Commands::Sokoban {
            board,
            horizon,
            minimize,
            show_steps,
            common,
        } => sokoban_command(board, horizon, minimize, show_steps, common),
        Commands::Batch { dir, common } => batch_command(dir, common),
        Commands::CheckPlan {
            board,
            moves,
            show_steps,
        } => check_plan_command(board, moves, show_steps),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load settings and apply command line overrides
fn load_settings(common: &CommonArgs, horizon: Option<usize>) -> Result<Settings> {
    let mut settings = if common.config.exists() {
        Settings::from_file(&common.config)?
    } else {
        if common.verbose {
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "Config file {} not found, using defaults",
                    common.config.display()
                ))
            );
        }
        Settings::default()
    };

    let overrides = CliOverrides {
        backend: common.backend,
        horizon,
        format: common.format,
        output_dir: common.output.clone(),
        verbose: common.verbose,
    };
    settings.merge_with_cli(&overrides);
    settings.validate().context("Invalid configuration")?;

    Ok(settings)
}

/// Print a report as JSON and save it, or do nothing for text output
fn emit_json(report: &SolveReport, settings: &Settings) -> Result<()> {
    if settings.output.format != OutputFormat::Json {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(report).context("Failed to serialize report")?);
    let path = save_report(report, &settings.output.output_directory)?;
    if settings.output.verbose {
        eprintln!("Saved report to {}", path.display());
    }
    Ok(())
}

fn sudoku_command(puzzle_path: PathBuf, common: CommonArgs) -> Result<()> {
    let settings = load_settings(&common, None)?;
    let text = settings.output.format == OutputFormat::Text;

    let puzzle = load_sudoku_from_file(&puzzle_path)?;
    if text {
        println!("{}", ColorOutput::info("Solving Sudoku..."));
        if settings.output.verbose {
            println!("Puzzle ({} blanks):", puzzle.blank_count());
            println!("{}", SolutionFormatter::format_sudoku(&puzzle));
        }
    }

    let start_time = Instant::now();
    let mut problem = SudokuProblem::new(settings.clone(), puzzle);
    let outcome = problem.solve()?;
    let elapsed = start_time.elapsed();

    if text {
        match &outcome {
            SolveOutcome::Solved(grid) => {
                println!(
                    "{}",
                    ColorOutput::success(&format!("Solved in {:.3}s", elapsed.as_secs_f64()))
                );
                println!("{}", SolutionFormatter::format_sudoku(grid));
            }
            SolveOutcome::Unsatisfiable => {
                println!("{}", ColorOutput::warning("No solution: the clues are contradictory"));
                println!("{}", SolutionFormatter::format_sudoku(&SudokuGrid::blank()));
            }
        }
        if settings.output.verbose {
            if let Some(stats) = problem.statistics() {
                println!("{}", stats);
            }
        }
    }

    let answer = outcome.into_solution().map(|grid| ReportAnswer::Grid(grid.rows()));
    let report = SolveReport::new(
        puzzle_path.display().to_string(),
        PuzzleKind::Sudoku,
        answer,
        problem.statistics().cloned(),
    );
    emit_json(&report, &settings)
}

fn sokoban_command(
    board_path: PathBuf,
    horizon: Option<usize>,
    minimize: bool,
    show_steps: bool,
    common: CommonArgs,
) -> Result<()> {
    let settings = load_settings(&common, horizon)?;
    let text = settings.output.format == OutputFormat::Text;

    let state = load_board_from_file(&board_path)?;
    let limit = if minimize && horizon.is_none() {
        settings.sokoban.max_horizon
    } else {
        settings.sokoban.horizon
    };

    if text {
        println!(
            "{}",
            ColorOutput::info(&format!(
                "Planning {} box(es) on a {}x{} board, horizon {}{}",
                state.boxes.len(),
                state.board.rows,
                state.board.cols,
                limit,
                if minimize { " (shortest plan)" } else { "" }
            ))
        );
    }

    let start_time = Instant::now();
    let mut problem = SokobanProblem::new(settings.clone(), state.clone());
    let outcome = if minimize {
        problem.solve_minimal(limit)?
    } else {
        problem.solve(limit)?
    };
    let elapsed = start_time.elapsed();

    if text {
        match &outcome {
            SolveOutcome::Solved(plan) => {
                println!(
                    "{}",
                    ColorOutput::success(&format!("Plan found in {:.3}s", elapsed.as_secs_f64()))
                );
                println!("{}", SolutionFormatter::format_plan(&state.board, plan, show_steps));
            }
            SolveOutcome::Unsatisfiable => {
                println!(
                    "{}",
                    ColorOutput::warning(&format!("No plan within {} moves", limit))
                );
            }
        }
        if settings.output.verbose {
            if let Some(stats) = problem.statistics() {
                println!("{}", stats);
            }
        }
    }

    let answer = outcome.into_solution().map(|plan| ReportAnswer::Plan {
        moves: plan.to_symbols(),
        length: plan.len(),
    });
    let report = SolveReport::new(
        board_path.display().to_string(),
        PuzzleKind::Sokoban,
        answer,
        problem.statistics().cloned(),
    );
    emit_json(&report, &settings)
}

fn batch_command(dir: PathBuf, common: CommonArgs) -> Result<()> {
    let settings = load_settings(&common, None)?;
    let files = find_puzzle_files(&dir)?;

    if files.is_empty() {
        println!("{}", ColorOutput::warning(&format!("No puzzle files in {}", dir.display())));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::info(&format!("Solving {} puzzle file(s) in parallel...", files.len()))
    );

    let start_time = Instant::now();
    let results = solve_batch(&files, &settings);

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failures += 1;
                eprintln!("{}", ColorOutput::error(&format!("{}: {:#}", path.display(), e)));
            }
        }
    }

    println!("\n{}", SolutionFormatter::format_report_summary(&reports));
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Finished {} file(s) in {:.3}s ({} failed)",
            reports.len() + failures,
            start_time.elapsed().as_secs_f64(),
            failures
        ))
    );

    if settings.output.format == OutputFormat::Json {
        for report in &reports {
            save_report(report, &settings.output.output_directory)?;
        }
        println!("Saved reports to {}", settings.output.output_directory.display());
    }

    Ok(())
}

fn check_plan_command(board_path: PathBuf, moves: String, show_steps: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Replaying plan..."));

    let state = load_board_from_file(&board_path)?;
    let moves = parse_moves(&moves)?;
    let result = PlanValidator::validate(&state, &moves);

    println!("{}", result);

    if show_steps {
        for (t, snapshot) in result.path.iter().enumerate() {
            println!("Step {}:", t);
            println!("{}", SolutionFormatter::format_snapshot(&state.board, snapshot));
        }
    }

    if result.is_valid() {
        println!("{}", ColorOutput::success("Plan solves the board"));
    } else {
        println!("{}", ColorOutput::error("Plan does not solve the board"));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    write_config(&config_path, &Settings::default(), force)?;

    let mut varisat_config = Settings::default();
    varisat_config.solver.backend = SolverBackend::Varisat;
    varisat_config.sokoban.horizon = 8;
    varisat_config.sokoban.max_horizon = 20;
    write_config(&config_dir.join("varisat.yaml"), &varisat_config, force)?;

    let written = create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created {} example puzzles in: {}", written.len(), puzzle_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- sudoku --puzzle {}", puzzle_dir.join("classic.sudoku").display());
    println!("3. Run: cargo run -- batch --dir {}", puzzle_dir.display());

    Ok(())
}

fn write_config(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if !path.exists() || force {
        settings
            .to_file(path)
            .with_context(|| format!("Failed to create configuration {}", path.display()))?;
        println!("Created: {}", path.display());
    } else {
        println!("Skipped: {} (already exists)", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "puzzle_sat",
            "sokoban",
            "--board",
            "room.sokoban",
            "--horizon",
            "5",
            "--minimize",
            "--backend",
            "varisat",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["puzzle_sat", "check-plan", "--board", "b.sokoban", "--moves", "RRD"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["puzzle_sat", "sudoku", "--puzzle", "p.sudoku", "--format", "xml"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert_eq!(Settings::from_file(&config_path).unwrap(), Settings::default());
        assert!(temp_dir.path().join("config/varisat.yaml").exists());
        assert!(temp_dir.path().join("puzzles/room.sokoban").exists());
    }

    #[test]
    fn test_sokoban_command_writes_json_report() {
        let temp_dir = tempdir().unwrap();
        let board = temp_dir.path().join("push.sokoban");
        std::fs::write(&board, "#####\n#PBG#\n#####\n").unwrap();
        let out = temp_dir.path().join("reports");

        let common = CommonArgs {
            config: temp_dir.path().join("missing.yaml"),
            backend: None,
            format: Some(OutputFormat::Json),
            output: Some(out.clone()),
            verbose: false,
        };
        sokoban_command(board, Some(1), false, false, common).unwrap();

        let content = std::fs::read_to_string(out.join("push_report.json")).unwrap();
        let report: SolveReport = serde_json::from_str(&content).unwrap();
        assert_eq!(
            report.answer,
            Some(ReportAnswer::Plan { moves: "R".to_string(), length: 1 })
        );
    }
}
