//! Backend contract used by the confirmation flow

mod client;

use std::future::Future;

use crate::error::ClearHistoryError;

pub use client::ApiClient;

/// Anything that can wipe the current user's chat history.
///
/// [`ApiClient`] is the HTTP implementation; tests drive the flow with
/// scripted backends.
pub trait HistoryBackend: Send + Sync + 'static {
    fn clear_history(&self) -> impl Future<Output = Result<(), ClearHistoryError>> + Send;
}
