//! Generic error reporting
//!
//! Lets the binary report library errors uniformly while still telling
//! apart mistakes the user can fix from provider or system failures.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the caller can fix this error by changing its input
    /// (for example updating a marker that was never added)
    fn is_user_actionable(&self) -> bool;

    /// The actionable message, if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Primary one-line description of an error for the given operation
///
/// User-actionable errors are described by their own message; system errors
/// by the operation context followed by the error itself.
pub fn describe_error<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg.to_string(),
        _ => format!("{}: {}", operation_context, error),
    }
}

/// Log an error with detail appropriate to its kind
///
/// ```rust,no_run
/// # use marker_manager::core::error_handling::log_error_with_context;
/// # use marker_manager::maps::api::ApiError;
/// let err = ApiError::Unavailable { message: "script not loaded".to_string() };
/// log_error_with_context(&err, "Replaying scenario");
/// // Logs: "Replaying scenario: Mapping provider unavailable: script not loaded"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("{}", describe_error(error, operation_context));
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
