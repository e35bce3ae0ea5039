pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod flow;
pub mod tracing_setup;

pub use api::{ApiClient, HistoryBackend};
pub use config::ClientConfig;
pub use error::ClearHistoryError;
pub use events::HostSignal;
pub use flow::{ConfirmationFlow, ConfirmationSnapshot, ConfirmationState, FlowEvent, OpenPhase};
