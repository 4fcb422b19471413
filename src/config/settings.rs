//! Configuration settings for the puzzle solvers

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub sudoku: SudokuConfig,
    pub sokoban: SokobanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Varisat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SudokuConfig {
    /// Also emit pairwise distinctness per row, column and block
    pub explicit_distinctness: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SokobanConfig {
    pub horizon: usize,
    /// Upper bound for the minimal-horizon search
    pub max_horizon: usize,
    pub dead_square_pruning: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbose: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                backend: SolverBackend::Cadical,
            },
            sudoku: SudokuConfig {
                explicit_distinctness: false,
            },
            sokoban: SokobanConfig {
                horizon: 10,
                max_horizon: 30,
                dead_square_pruning: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                verbose: false,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.sokoban.max_horizon < self.sokoban.horizon {
            anyhow::bail!(
                "sokoban.max_horizon ({}) must be at least sokoban.horizon ({})",
                self.sokoban.max_horizon,
                self.sokoban.horizon
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(horizon) = cli_overrides.horizon {
            self.sokoban.horizon = horizon;
            self.sokoban.max_horizon = self.sokoban.max_horizon.max(horizon);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.verbose {
            self.output.verbose = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub backend: Option<SolverBackend>,
    pub horizon: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.solver.backend, SolverBackend::Cadical);
        assert!(settings.sokoban.dead_square_pruning);
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.solver.backend = SolverBackend::Varisat;
        settings.sokoban.horizon = 4;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_parse_snake_case_yaml() {
        let yaml = "
solver:
  backend: varisat
sudoku:
  explicit_distinctness: true
sokoban:
  horizon: 3
  max_horizon: 12
  dead_square_pruning: false
output:
  format: json
  verbose: true
  output_directory: out
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.solver.backend, SolverBackend::Varisat);
        assert!(settings.sudoku.explicit_distinctness);
        assert_eq!(settings.sokoban.max_horizon, 12);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_horizon_bounds() {
        let mut settings = Settings::default();
        settings.sokoban.horizon = 40;
        settings.sokoban.max_horizon = 20;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            backend: Some(SolverBackend::Varisat),
            horizon: Some(50),
            format: Some(OutputFormat::Json),
            output_dir: None,
            verbose: true,
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.solver.backend, SolverBackend::Varisat);
        assert_eq!(settings.sokoban.horizon, 50);
        assert_eq!(settings.sokoban.max_horizon, 50);
        assert!(settings.output.verbose);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::load_or_default(temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
