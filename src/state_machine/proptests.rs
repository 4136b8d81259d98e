//! Property-based tests for the turn state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::inference::PredictionResult;
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_turn_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("t1".to_string()), Just("t2".to_string()), "[a-z]{8}"]
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,8}"
}

fn arb_message() -> impl Strategy<Value = String> {
    (arb_blank(), "[a-zA-Z0-9?!+]{1}[a-zA-Z0-9 ?!+]{0,30}", arb_blank())
        .prop_map(|(pre, body, post)| format!("{pre}{body}{post}"))
}

fn arb_result() -> impl Strategy<Value = PredictionResult> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,40}".prop_map(PredictionResult::success),
        "[a-zA-Z0-9 :]{0,40}".prop_map(PredictionResult::failure),
    ]
}

fn arb_submit() -> impl Strategy<Value = Event> {
    (arb_turn_id(), prop_oneof![arb_message(), arb_blank()]).prop_map(|(turn_id, text)| {
        Event::Submit {
            turn_id,
            text,
            submitted_at: Utc::now(),
        }
    })
}

fn arb_resolve() -> impl Strategy<Value = Event> {
    (arb_turn_id(), arb_result()).prop_map(|(turn_id, result)| Event::Resolve { turn_id, result })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![arb_submit(), arb_resolve()]
}

fn pending_state(turn_id: &str, text: &str) -> TurnState {
    let event = Event::Submit {
        turn_id: turn_id.to_string(),
        text: text.to_string(),
        submitted_at: Utc::now(),
    };
    transition(&TurnState::Idle, event).unwrap().new_state
}

fn position(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> Option<usize> {
    effects.iter().position(pred)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Rejected events never change state; accepted ones move Idle <-> Pending only
    #[test]
    fn prop_transitions_alternate(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = TurnState::Idle;

        for event in events {
            let was_pending = state.is_pending();
            match transition(&state, event) {
                Ok(result) => {
                    prop_assert_ne!(was_pending, result.new_state.is_pending());
                    state = result.new_state;
                }
                Err(_) => { /* Refused events leave the state alone */ }
            }
        }
    }

    // Every accepted submit creates exactly one pending turn and one request
    #[test]
    fn prop_idle_accepts_trimmed_text(turn_id in arb_turn_id(), text in arb_message()) {
        let result = transition(&TurnState::Idle, Event::Submit {
            turn_id: turn_id.clone(),
            text: text.clone(),
            submitted_at: Utc::now(),
        }).unwrap();

        let turn = result.new_state.pending_turn().unwrap();
        prop_assert_eq!(&turn.user_text, text.trim());
        prop_assert_eq!(turn.status, TurnStatus::Pending);

        let appended: Vec<_> = result.effects.iter().filter_map(|e| match e {
            Effect::AppendUserMessage { text } => Some(text.clone()),
            _ => None,
        }).collect();
        prop_assert_eq!(appended, vec![text.trim().to_string()]);

        let requests: Vec<_> = result.effects.iter().filter_map(|e| match e {
            Effect::RequestPrediction { request, .. } => Some(request.clone()),
            _ => None,
        }).collect();
        prop_assert_eq!(requests.len(), 1);
        prop_assert_eq!(&requests[0].query, "");
        prop_assert_eq!(&requests[0].context, text.trim());

        // Input is cleared and locked before the indicator appears
        let clear = position(&result.effects, |e| matches!(e, Effect::ClearInput)).unwrap();
        let lock = position(&result.effects, |e| *e == Effect::input_enabled(false)).unwrap();
        let show = position(&result.effects, |e| matches!(e, Effect::ShowPending { .. })).unwrap();
        prop_assert!(clear < show);
        prop_assert!(lock < show);
    }

    // Blank input never creates a turn
    #[test]
    fn prop_blank_input_rejected(turn_id in arb_turn_id(), text in arb_blank()) {
        let result = transition(&TurnState::Idle, Event::Submit {
            turn_id,
            text,
            submitted_at: Utc::now(),
        });
        prop_assert_eq!(result.unwrap_err(), TransitionError::EmptyInput);
    }

    // Pending rejects every submission, blank or not
    #[test]
    fn prop_pending_rejects_submit(first in arb_message(), event in arb_submit()) {
        let state = pending_state("t1", &first);
        let err = transition(&state, event).unwrap_err();
        prop_assert!(err.is_input_gate());
    }

    // Resolve cancels the indicator before anything is revealed and returns to Idle
    #[test]
    fn prop_resolve_cancels_before_reveal(text in arb_message(), result in arb_result()) {
        let state = pending_state("t1", &text);
        let out = transition(&state, Event::Resolve {
            turn_id: "t1".to_string(),
            result: result.clone(),
        }).unwrap();

        prop_assert_eq!(&out.new_state, &TurnState::Idle);

        let cancel = position(&out.effects, |e| matches!(e, Effect::CancelPending)).unwrap();
        let reveal = position(&out.effects, |e| matches!(e, Effect::RevealReply { .. })).unwrap();
        prop_assert_eq!(cancel, 0);
        prop_assert!(cancel < reveal);
        prop_assert_eq!(
            out.effects.iter().filter(|e| matches!(e, Effect::CancelPending)).count(),
            1
        );

        let expected = match &result {
            PredictionResult::Success { text } => text.clone(),
            PredictionResult::Failure { .. } => APOLOGY.to_string(),
        };
        prop_assert_eq!(&out.effects[reveal], &Effect::RevealReply { text: expected });

        let finished = out.effects.iter().find_map(|e| match e {
            Effect::TurnFinished { turn } => Some(turn.clone()),
            _ => None,
        }).unwrap();
        prop_assert!(finished.status.is_settled());
        prop_assert_eq!(finished.status == TurnStatus::Succeeded, result.is_success());
    }

    // Failure detail never reaches the rendered text
    #[test]
    fn prop_failure_detail_hidden(detail in "[a-zA-Z0-9 ]{1,40}") {
        let state = pending_state("t1", "hi");
        let out = transition(&state, Event::Resolve {
            turn_id: "t1".to_string(),
            result: PredictionResult::failure(detail),
        }).unwrap();

        let apology = Effect::RevealReply { text: APOLOGY.to_string() };
        prop_assert!(out.effects.contains(&apology));
    }
}
