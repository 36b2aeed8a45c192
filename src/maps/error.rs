//! Mapping provider error types

/// Errors reported by a `MapsApiWrapper` or a `NativeMarker`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Native marker creation failed: {message}")]
    CreationFailed { message: String },

    #[error("Native call '{call}' failed: {message}")]
    CallFailed { call: String, message: String },

    #[error("Mapping provider unavailable: {message}")]
    Unavailable { message: String },
}

impl crate::core::error_handling::ContextualError for ApiError {
    fn is_user_actionable(&self) -> bool {
        false // Provider failures are never fixable from the caller's input
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for mapping provider operations
pub type ApiResult<T> = Result<T, ApiError>;
