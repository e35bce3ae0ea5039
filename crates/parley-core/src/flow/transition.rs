use super::event::{FlowEffect, FlowEvent};
use super::state::{ConfirmationState, OpenPhase};

/// Apply one event to the flow state.
///
/// Pure: returns the next state and the effect, if any, the caller must run.
/// Events that do not apply to the current state leave it unchanged.
pub fn transition(
    state: &ConfirmationState,
    event: FlowEvent,
) -> (ConfirmationState, Option<FlowEffect>) {
    use ConfirmationState::{Closed, Open};
    use OpenPhase::{Failed, Idle, Pending};

    match (state, event) {
        // Opening always starts from a clean slate, except mid-request
        (Open(Pending), FlowEvent::OpenRequested) => (state.clone(), None),
        (_, FlowEvent::OpenRequested) => (Open(Idle), None),

        (Open(Idle) | Open(Failed(_)), FlowEvent::CloseRequested) => (Closed, None),

        (Open(Idle) | Open(Failed(_)), FlowEvent::ConfirmRequested) => {
            (Open(Pending), Some(FlowEffect::DispatchClearHistory))
        }

        (Open(Pending), FlowEvent::RequestSucceeded) => (Closed, Some(FlowEffect::SessionReset)),
        (Open(Pending), FlowEvent::RequestFailed(message)) => (Open(Failed(message)), None),

        // Close while pending, confirm while pending or closed, stale outcomes
        _ => (state.clone(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConfirmationState::{Closed, Open};
    use OpenPhase::{Failed, Idle, Pending};

    fn all_states() -> Vec<ConfirmationState> {
        vec![
            Closed,
            Open(Idle),
            Open(Pending),
            Open(Failed("boom".to_string())),
        ]
    }

    fn all_events() -> Vec<FlowEvent> {
        vec![
            FlowEvent::OpenRequested,
            FlowEvent::CloseRequested,
            FlowEvent::ConfirmRequested,
            FlowEvent::RequestSucceeded,
            FlowEvent::RequestFailed("nope".to_string()),
        ]
    }

    #[test]
    fn test_open_close_alternates_while_idle() {
        let mut state = Closed;
        for i in 0..10 {
            let event = if i % 2 == 0 {
                FlowEvent::OpenRequested
            } else {
                FlowEvent::CloseRequested
            };
            let (next, effect) = transition(&state, event);
            assert!(effect.is_none());
            let expected = if i % 2 == 0 { Open(Idle) } else { Closed };
            assert_eq!(next, expected);
            state = next;
        }
    }

    #[test]
    fn test_open_while_pending_is_noop() {
        let (next, effect) = transition(&Open(Pending), FlowEvent::OpenRequested);
        assert_eq!(next, Open(Pending));
        assert!(effect.is_none());
        assert!(next.snapshot().is_loading);
    }

    #[test]
    fn test_close_while_pending_is_noop() {
        let (next, effect) = transition(&Open(Pending), FlowEvent::CloseRequested);
        assert_eq!(next, Open(Pending));
        assert!(effect.is_none());
    }

    #[test]
    fn test_confirm_clears_error_and_dispatches() {
        let (next, effect) = transition(&Open(Failed("old".into())), FlowEvent::ConfirmRequested);
        assert_eq!(next, Open(Pending));
        assert_eq!(next.error(), None);
        assert_eq!(effect, Some(FlowEffect::DispatchClearHistory));
    }

    #[test]
    fn test_confirm_while_pending_does_not_dispatch() {
        let (next, effect) = transition(&Open(Pending), FlowEvent::ConfirmRequested);
        assert_eq!(next, Open(Pending));
        assert!(effect.is_none());
    }

    #[test]
    fn test_confirm_while_closed_is_ignored() {
        let (next, effect) = transition(&Closed, FlowEvent::ConfirmRequested);
        assert_eq!(next, Closed);
        assert!(effect.is_none());
    }

    #[test]
    fn test_success_closes_and_resets_session() {
        let (next, effect) = transition(&Open(Pending), FlowEvent::RequestSucceeded);
        assert_eq!(next, Closed);
        assert_eq!(effect, Some(FlowEffect::SessionReset));
    }

    #[test]
    fn test_failure_keeps_dialog_open_with_message() {
        let (next, effect) = transition(
            &Open(Pending),
            FlowEvent::RequestFailed("Failed to clear history (status: 401)".into()),
        );
        assert!(next.is_open());
        assert!(!next.is_loading());
        assert!(next.error().unwrap().contains("401"));
        assert!(effect.is_none());
    }

    #[test]
    fn test_reopen_after_failure_clears_error() {
        let (closed, _) = transition(&Open(Failed("boom".into())), FlowEvent::CloseRequested);
        let (reopened, _) = transition(&closed, FlowEvent::OpenRequested);
        assert_eq!(reopened, Open(Idle));

        // Re-open without closing first also clears it
        let (reopened, _) = transition(&Open(Failed("boom".into())), FlowEvent::OpenRequested);
        assert_eq!(reopened, Open(Idle));
    }

    #[test]
    fn test_stale_outcomes_are_ignored() {
        for state in [Closed, Open(Idle), Open(Failed("x".into()))] {
            let (next, effect) = transition(&state, FlowEvent::RequestSucceeded);
            assert_eq!(next, state);
            assert!(effect.is_none());

            let (next, effect) = transition(&state, FlowEvent::RequestFailed("late".into()));
            assert_eq!(next, state);
            assert!(effect.is_none());
        }
    }

    #[test]
    fn test_invariants_hold_for_every_transition() {
        for state in all_states() {
            for event in all_events() {
                let (next, effect) = transition(&state, event.clone());
                let snapshot = next.snapshot();

                if snapshot.is_loading {
                    assert!(snapshot.is_open, "{state:?} + {event:?}");
                }
                if snapshot.error.is_some() {
                    assert!(snapshot.is_open && !snapshot.is_loading, "{state:?} + {event:?}");
                }
                if effect == Some(FlowEffect::DispatchClearHistory) {
                    assert!(!state.is_loading(), "dispatch from pending: {event:?}");
                    assert!(next.is_loading());
                }
                if state.is_loading() && event == FlowEvent::CloseRequested {
                    assert_eq!(next, state);
                }
            }
        }
    }
}
