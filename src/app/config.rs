//! TOML configuration file loading
//!
//! ```toml
//! color = false
//!
//! [manager]
//! duplicate_policy = "replace"
//!
//! [logging]
//! level = "debug"
//! format = "ext"
//! file = "/tmp/marker-replay.log"
//! ```

use crate::app::error::{AppError, AppResult};
use crate::core::logging::LoggingConfig;
use crate::markers::api::ManagerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "MarkerReplay";
pub const CONFIG_FILE_NAME: &str = "marker-replay.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub color: Option<bool>,
    pub manager: ManagerConfig,
    pub logging: LoggingConfig,
}

impl FileConfig {
    pub fn parse(contents: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}

/// Default config location, e.g. `~/.config/MarkerReplay/marker-replay.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration
///
/// An explicitly named file must exist. Without one, the default location is
/// used if present, and built-in defaults otherwise.
pub async fn load_config(explicit: Option<&Path>) -> AppResult<FileConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::Config {
                    path: path.to_path_buf(),
                    message: format!(
                        "The specified configuration file does not exist: {}",
                        path.display()
                    ),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No configuration file found, using defaults");
                return Ok(FileConfig::default());
            }
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;
    FileConfig::parse(&contents, &path)
}
