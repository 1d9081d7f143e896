//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::knowledge::Resolution;
use crate::message::{Message, Role};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("test-session")
}

/// Minimal model of the executor: applies effects to a history vector
fn apply_effects(history: &mut Vec<Message>, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::AppendMessage { message } => history.push(message.clone()),
            Effect::ClearHistory => history.clear(),
            Effect::RequestResolution { .. }
            | Effect::DiscardReply { .. }
            | Effect::NotifyStateChange { .. } => {}
        }
    }
}

/// The event the backend would deliver for the current state, if any
fn backend_event(state: &SessionState, fail: bool) -> Option<Event> {
    match state {
        SessionState::Resolving { query_id, .. } if fail => {
            Some(Event::resolution_failed(query_id.clone(), "boom"))
        }
        SessionState::Resolving { query_id, .. } => Some(Event::resolution_complete(
            query_id.clone(),
            Resolution::fallback(),
        )),
        SessionState::Idle => None,
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Action {
    Submit(String),
    Clear,
    Deliver { fail: bool },
}

fn arb_query_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,5}",
        "[a-zA-Z ?]{1,40}",
        "a{495,510}",
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        arb_query_text().prop_map(Action::Submit),
        Just(Action::Clear),
        any::<bool>().prop_map(|fail| Action::Deliver { fail }),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        ("[a-z]{8}", any::<bool>()).prop_map(|(query_id, discard_reply)| {
            SessionState::Resolving {
                query_id,
                discard_reply,
            }
        }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_query_text().prop_map(Event::user_query),
        Just(Event::ClearHistory),
        "[a-z]{8}".prop_map(|id| Event::resolution_complete(id, Resolution::fallback())),
        "[a-z]{8}".prop_map(|id| Event::resolution_failed(id, "err")),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Clearing is accepted in every state and never changes busy-ness
    #[test]
    fn prop_clear_always_succeeds(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::ClearHistory);
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert_eq!(result.new_state.is_busy(), state.is_busy());
        prop_assert!(result.effects.contains(&Effect::ClearHistory));
    }

    // A busy session rejects every new query
    #[test]
    fn prop_busy_rejects_queries(state in arb_state(), text in arb_query_text()) {
        let result = transition(&state, &test_context(), Event::user_query(text));
        if state.is_busy() {
            prop_assert_eq!(result.unwrap_err(), TransitionError::Busy);
        }
    }

    // RequestResolution only ever accompanies entry into Resolving
    #[test]
    fn prop_request_implies_resolving(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            let requests = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestResolution { .. }))
                .count();
            prop_assert!(requests <= 1);
            if requests == 1 {
                prop_assert!(!state.is_busy());
                prop_assert!(result.new_state.is_busy());
            }
        }
    }

    // Busy flag notifications always agree with the new state
    #[test]
    fn prop_notifications_match_state(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            for effect in &result.effects {
                if let Effect::NotifyStateChange { busy } = effect {
                    prop_assert_eq!(*busy, result.new_state.is_busy());
                }
            }
        }
    }

    // Driving a session through arbitrary actions keeps history well formed:
    // every assistant reply directly follows the user query it answers, and
    // a submit while busy never yields a second reply.
    #[test]
    fn prop_history_alternates(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let ctx = test_context();
        let mut state = SessionState::Idle;
        let mut history: Vec<Message> = Vec::new();

        for action in actions {
            let event = match action {
                Action::Submit(text) => Event::user_query(text),
                Action::Clear => Event::ClearHistory,
                Action::Deliver { fail } => match backend_event(&state, fail) {
                    Some(event) => event,
                    None => continue,
                },
            };
            let len_before = history.len();
            match transition(&state, &ctx, event) {
                Ok(result) => {
                    apply_effects(&mut history, &result.effects);
                    state = result.new_state;
                }
                Err(_) => {
                    prop_assert_eq!(history.len(), len_before);
                }
            }

            for pair in history.windows(2) {
                if pair[1].role == Role::Assistant {
                    prop_assert_eq!(pair[0].role, Role::User);
                }
            }
            let replies = history.iter().filter(|m| m.role == Role::Assistant).count();
            let queries = history.len() - replies;
            prop_assert!(replies <= queries);
            if state.is_busy() {
                // The in-flight query is either the last entry or was cleared away
                prop_assert!(history.last().map_or(true, |m| m.role == Role::User));
            }
        }
    }
}
