/// Instructions the core hands back to whatever hosts it.
///
/// The host owns the reaction: a terminal UI rebuilds its session, a
/// headless caller may simply reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// History was cleared - discard all session state and start over
    SessionReset,
}
