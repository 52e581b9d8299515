use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::model::config::PlannerConfig;

/// A drag-driven task-planning calendar for the terminal
#[derive(Debug, Parser)]
#[command(name = "dp", version, about)]
pub struct Cli {
    /// Path to a dayplan.toml config file (default: ./dayplan.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured week start ("sunday" or "monday")
    #[arg(long, value_name = "DAY")]
    pub week_start: Option<String>,

    /// Seed the session with sample tasks around today
    #[arg(long)]
    pub demo: bool,
}

/// Error type for startup
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown week start {0:?} (expected \"sunday\" or \"monday\")")]
    BadWeekStart(String),
}

/// Resolve the effective config: explicit `--config` path, else
/// `./dayplan.toml` when present, else defaults. CLI flags override the file.
pub fn load_config(cli: &Cli) -> Result<PlannerConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new("dayplan.toml");
            if default_path.exists() {
                read_config(default_path)?
            } else {
                PlannerConfig::default()
            }
        }
    };

    if let Some(week_start) = &cli.week_start {
        let normalized = week_start.trim().to_ascii_lowercase();
        if normalized != "sunday" && normalized != "monday" {
            return Err(CliError::BadWeekStart(week_start.clone()));
        }
        config.week_start = normalized;
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<PlannerConfig, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}
