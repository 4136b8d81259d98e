//! Events that drive a turn

use crate::inference::PredictionResult;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User pressed send; `turn_id` is used only if the submission is accepted
    Submit {
        turn_id: String,
        text: String,
        submitted_at: DateTime<Utc>,
    },

    /// The inference call for `turn_id` settled
    Resolve {
        turn_id: String,
        result: PredictionResult,
    },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit {
            turn_id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            submitted_at: Utc::now(),
        }
    }
}
