//! Application error types

use crate::core::error_handling::ContextualError;
use crate::markers::api::MarkerError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String },

    #[error("Scenario error: {message}")]
    Scenario { message: String },

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config { .. } | AppError::InvalidOption { .. } | AppError::Scenario { .. } => {
                true
            }
            AppError::Marker(e) => e.is_user_actionable(),
            AppError::Io { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config { message, .. }
            | AppError::InvalidOption { message }
            | AppError::Scenario { message } => Some(message),
            AppError::Marker(e) => e.user_message(),
            AppError::Io { .. } => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
