//! New-chat confirmation flow
//!
//! A pure transition table ([`transition`]) plus a controller
//! ([`ConfirmationFlow`]) that owns the state, runs the clear-history
//! request and feeds its outcome back through the table.

mod controller;
pub mod event;
pub mod state;
pub(crate) mod transition;

pub use controller::{ConfirmationFlow, RequestOutcome};
pub use event::{FlowEffect, FlowEvent};
pub use state::{ConfirmationSnapshot, ConfirmationState, OpenPhase};
pub use transition::transition;
