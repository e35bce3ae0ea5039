/// Where the confirmation dialog is in its lifecycle.
///
/// Loading and error only exist inside `Open`, so a closed dialog can never
/// be loading or carry an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationState {
    #[default]
    Closed,
    Open(OpenPhase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenPhase {
    /// Waiting for the user to confirm or cancel
    Idle,
    /// Clear-history request in flight
    Pending,
    /// Last attempt failed with this message
    Failed(String),
}

impl ConfirmationState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmationState::Open(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ConfirmationState::Open(OpenPhase::Pending))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConfirmationState::Open(OpenPhase::Failed(message)) => Some(message),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ConfirmationSnapshot {
        ConfirmationSnapshot {
            is_open: self.is_open(),
            is_loading: self.is_loading(),
            error: self.error().map(str::to_string),
        }
    }
}

/// Read-only view of the flow handed to presenters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationSnapshot {
    pub is_open: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        let state = ConfirmationState::default();
        assert_eq!(state, ConfirmationState::Closed);
        assert_eq!(state.snapshot(), ConfirmationSnapshot::default());
    }

    #[test]
    fn test_snapshot_flags() {
        let pending = ConfirmationState::Open(OpenPhase::Pending).snapshot();
        assert!(pending.is_open);
        assert!(pending.is_loading);
        assert!(pending.error.is_none());

        let failed = ConfirmationState::Open(OpenPhase::Failed("boom".into())).snapshot();
        assert!(failed.is_open);
        assert!(!failed.is_loading);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }
}
