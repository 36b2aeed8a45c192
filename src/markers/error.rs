//! Marker manager error types

use crate::maps::api::ApiError;
use crate::markers::marker::MarkerId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkerError {
    #[error("Unknown marker: {id} was never added or has already been deleted")]
    UnknownMarker { id: MarkerId },

    #[error("Marker already registered: {id}")]
    AlreadyRegistered { id: MarkerId },

    #[error("Native marker for {id} could not be created: {source}")]
    CreationFailed { id: MarkerId, source: ApiError },

    #[error("Native call '{call}' on {id} failed: {source}")]
    NativeCallFailed {
        id: MarkerId,
        call: &'static str,
        source: ApiError,
    },

    #[error("Worker for {id} stopped before answering")]
    WorkerStopped { id: MarkerId },

    #[error("No async runtime available to drive {id}")]
    NoRuntime { id: MarkerId },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MarkerError {
    /// Marker the error refers to, if any
    pub fn marker_id(&self) -> Option<MarkerId> {
        match self {
            MarkerError::UnknownMarker { id }
            | MarkerError::AlreadyRegistered { id }
            | MarkerError::CreationFailed { id, .. }
            | MarkerError::NativeCallFailed { id, .. }
            | MarkerError::WorkerStopped { id }
            | MarkerError::NoRuntime { id } => Some(*id),
            MarkerError::Internal { .. } => None,
        }
    }
}

impl crate::core::error_handling::ContextualError for MarkerError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            MarkerError::UnknownMarker { .. } | MarkerError::AlreadyRegistered { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            MarkerError::UnknownMarker { .. } => {
                Some("Marker is not registered; add it before updating or deleting it")
            }
            MarkerError::AlreadyRegistered { .. } => {
                Some("Marker is already registered; delete it before adding it again")
            }
            _ => None,
        }
    }
}

/// Result type for marker manager operations
pub type MarkerResult<T> = Result<T, MarkerError>;
