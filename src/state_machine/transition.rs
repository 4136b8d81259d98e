//! Pure state transition function

use super::{Effect, Event, Turn, TurnState};
use crate::inference::{PredictionRequest, PredictionResult};
use thiserror::Error;

/// Shown in place of the reply whenever a turn fails; the raw error is only logged
pub const APOLOGY: &str = "⚠️ Sorry, something went wrong calling the model.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Reasons an event is refused
///
/// `EmptyInput` and `TurnPending` are input gating, not faults: the runtime
/// drops them without telling the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Input is empty")]
    EmptyInput,
    #[error("A reply is still pending")]
    TurnPending,
    #[error("No turn is pending")]
    NoPendingTurn,
    #[error("Result for turn {got} does not match pending turn {expected}")]
    TurnMismatch { expected: String, got: String },
}

impl TransitionError {
    /// Submissions refused by the input gate
    pub fn is_input_gate(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::TurnPending)
    }
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: &TurnState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit -> Pending
        (
            TurnState::Idle,
            Event::Submit {
                turn_id,
                text,
                submitted_at,
            },
        ) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyInput);
            }

            let turn = Turn::new(turn_id.clone(), trimmed, submitted_at).begin();
            let request = PredictionRequest::for_message(trimmed);

            Ok(TransitionResult::new(TurnState::Pending { turn }).with_effects([
                Effect::AppendUserMessage {
                    text: trimmed.to_string(),
                },
                Effect::ScrollToLatest,
                Effect::ClearInput,
                Effect::input_enabled(false),
                Effect::ShowPending {
                    turn_id: turn_id.clone(),
                },
                Effect::ScrollToLatest,
                Effect::RequestPrediction { turn_id, request },
            ]))
        }

        // One request in flight at a time; nothing is queued
        (TurnState::Pending { .. }, Event::Submit { .. }) => Err(TransitionError::TurnPending),

        // Pending + Resolve -> Done -> Idle
        (TurnState::Pending { turn }, Event::Resolve { turn_id, result }) => {
            if turn.id != turn_id {
                return Err(TransitionError::TurnMismatch {
                    expected: turn.id.clone(),
                    got: turn_id,
                });
            }

            let reply = match &result {
                PredictionResult::Success { text } => text.clone(),
                PredictionResult::Failure { .. } => APOLOGY.to_string(),
            };
            let finished = turn.clone().settle(result);

            Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::CancelPending)
                .with_effect(Effect::RevealReply { text: reply })
                .with_effect(Effect::input_enabled(true))
                .with_effect(Effect::TurnFinished { turn: finished }))
        }

        (TurnState::Idle, Event::Resolve { .. }) => Err(TransitionError::NoPendingTurn),
    }
}
