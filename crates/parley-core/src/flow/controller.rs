use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::event::{FlowEffect, FlowEvent};
use super::state::{ConfirmationSnapshot, ConfirmationState};
use super::transition::transition;
use crate::api::HistoryBackend;
use crate::error::ClearHistoryError;
use crate::events::HostSignal;

/// Result of one clear-history attempt, delivered back to the flow
pub type RequestOutcome = Result<(), ClearHistoryError>;

/// Owns the confirmation state and the single in-flight request.
///
/// Must be driven from a tokio runtime: confirming spawns the request task.
/// The host awaits [`ConfirmationFlow::next_outcome`] alongside its other
/// event sources and passes the result to [`ConfirmationFlow::resolve`].
/// Dropping the flow aborts a request that is still running.
pub struct ConfirmationFlow<B: HistoryBackend> {
    state: ConfirmationState,
    backend: Arc<B>,
    request_timeout: Duration,
    outcome_tx: mpsc::UnboundedSender<RequestOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<RequestOutcome>,
    in_flight: Option<JoinHandle<()>>,
    dispatched: u64,
}

impl<B: HistoryBackend> ConfirmationFlow<B> {
    pub fn new(backend: Arc<B>, request_timeout: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: ConfirmationState::Closed,
            backend,
            request_timeout,
            outcome_tx,
            outcome_rx,
            in_flight: None,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn snapshot(&self) -> ConfirmationSnapshot {
        self.state.snapshot()
    }

    /// Number of requests this flow has sent
    pub fn dispatched_requests(&self) -> u64 {
        self.dispatched
    }

    pub fn open(&mut self) {
        self.handle(FlowEvent::OpenRequested);
    }

    pub fn close(&mut self) {
        self.handle(FlowEvent::CloseRequested);
    }

    pub fn confirm(&mut self) {
        self.handle(FlowEvent::ConfirmRequested);
    }

    /// Feed one event through the transition table and run its effect
    pub fn handle(&mut self, event: FlowEvent) -> Option<HostSignal> {
        let (next, effect) = transition(&self.state, event);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "confirmation flow transition");
        }
        self.state = next;

        match effect? {
            FlowEffect::DispatchClearHistory => {
                self.dispatch();
                None
            }
            FlowEffect::SessionReset => Some(HostSignal::SessionReset),
        }
    }

    /// Wait for the in-flight request to finish.
    ///
    /// Cancel-safe; pends forever while nothing is in flight.
    pub async fn next_outcome(&mut self) -> RequestOutcome {
        match self.outcome_rx.recv().await {
            Some(outcome) => outcome,
            // The flow holds a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// Apply a finished request to the state
    pub fn resolve(&mut self, outcome: RequestOutcome) -> Option<HostSignal> {
        self.in_flight = None;
        match outcome {
            Ok(()) => self.handle(FlowEvent::RequestSucceeded),
            Err(err) => {
                tracing::error!(error = %err, "clear history failed");
                self.handle(FlowEvent::RequestFailed(err.user_message()))
            }
        }
    }

    fn dispatch(&mut self) {
        self.dispatched += 1;
        let backend = self.backend.clone();
        let timeout = self.request_timeout;
        let outcome_tx = self.outcome_tx.clone();

        tracing::info!(attempt = self.dispatched, "dispatching clear-history request");
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, backend.clear_history()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ClearHistoryError::TimedOut(timeout)),
            };
            let _ = outcome_tx.send(outcome);
        }));
    }
}

impl<B: HistoryBackend> Drop for ConfirmationFlow<B> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            tracing::debug!("aborting in-flight clear-history request");
            handle.abort();
        }
    }
}
