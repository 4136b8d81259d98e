//! Effects produced by state transitions

use super::state::Turn;
use crate::inference::PredictionRequest;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add the user's bubble to the log
    AppendUserMessage { text: String },

    /// Empty the input box
    ClearInput,

    /// Lock or unlock the input box and send button
    SetInputEnabled { enabled: bool },

    /// Add the pending indicator and start its animation
    ShowPending { turn_id: String },

    /// Send the request (spawns as background task)
    RequestPrediction {
        turn_id: String,
        request: PredictionRequest,
    },

    /// Stop the pending animation; always runs before any reply text is written
    CancelPending,

    /// Replace the indicator with `text`, revealed one character at a time
    RevealReply { text: String },

    /// Keep the newest bubble in view
    ScrollToLatest,

    /// The turn settled and the machine is idle again
    TurnFinished { turn: Turn },
}

impl Effect {
    pub fn input_enabled(enabled: bool) -> Self {
        Effect::SetInputEnabled { enabled }
    }
}
