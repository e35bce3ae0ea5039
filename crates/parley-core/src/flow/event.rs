/// Inputs to the confirmation flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    OpenRequested,
    CloseRequested,
    ConfirmRequested,
    RequestSucceeded,
    /// Carries the message to show in the dialog
    RequestFailed(String),
}

/// Side effects the controller must carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    DispatchClearHistory,
    SessionReset,
}
