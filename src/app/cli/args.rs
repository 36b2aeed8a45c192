//! Command line arguments for marker-replay

use crate::app::config::FileConfig;
use crate::app::error::{AppError, AppResult};
use crate::core::logging::LogFormat;
use crate::markers::api::DuplicatePolicy;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug, Clone)]
#[command(name = "marker-replay")]
#[command(about = "Replay marker lifecycle scenarios against an in-memory map")]
#[command(version, long_version = crate::long_version())]
pub struct Args {
    /// Scenario file (TOML) to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// What to do when a marker is added twice
    #[arg(short = 'd', long = "duplicate-policy", value_name = "POLICY", value_parser = ["reject", "replace"])]
    pub duplicate_policy: Option<String>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the recorded native calls as JSON
    #[arg(short = 'j', long = "json")]
    pub json: bool,
}

impl Args {
    /// Apply command line overrides on top of file configuration
    pub fn apply_to(&self, config: &mut FileConfig) -> AppResult<()> {
        if let Some(policy) = &self.duplicate_policy {
            config.manager.duplicate_policy =
                DuplicatePolicy::from_str(policy).map_err(|_| AppError::InvalidOption {
                    message: format!("unknown duplicate policy '{}'", policy),
                })?;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format =
                LogFormat::from_str(format).map_err(|_| AppError::InvalidOption {
                    message: format!("unknown log format '{}'", format),
                })?;
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if self.color {
            config.color = Some(true);
        } else if self.no_color {
            config.color = Some(false);
        }
        Ok(())
    }
}

/// Explicit setting wins; otherwise color only when stdout is a terminal
pub fn resolve_color(setting: Option<bool>) -> bool {
    setting.unwrap_or_else(|| std::io::stdout().is_terminal())
}
