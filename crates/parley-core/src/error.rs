use std::time::Duration;

use crate::constants::FALLBACK_ERROR_MESSAGE;

/// Failure of a clear-history request.
///
/// The `Display` output is the human-readable message the confirmation
/// dialog shows, so every variant renders something a user can act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClearHistoryError {
    /// Backend answered with a non-2xx status
    #[error("Failed to clear history (status: {status})")]
    Status { status: u16 },

    /// The request never produced a response
    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Transport { message: Option<String> },

    #[error("Clear history request timed out after {}", format_timeout(*.0))]
    TimedOut(Duration),
}

/// Whole seconds, or milliseconds below one second
fn format_timeout(timeout: Duration) -> String {
    if timeout < Duration::from_secs(1) {
        format!("{}ms", timeout.as_millis())
    } else {
        format!("{}s", timeout.as_secs())
    }
}

impl ClearHistoryError {
    /// Build a transport failure, treating a blank message as absent
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            None
        } else {
            Some(message)
        };
        Self::Transport { message }
    }

    /// Message shown in the dialog after a failed attempt
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ClearHistoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
            };
        }
        Self::transport(err.to_string())
    }
}
