//! Turn state types

use crate::inference::PredictionResult;
use chrono::{DateTime, Utc};

/// Lifecycle of a single turn; only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl TurnStatus {
    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: TurnStatus) -> bool {
        matches!(
            (self, next),
            (TurnStatus::Idle, TurnStatus::Pending)
                | (TurnStatus::Pending, TurnStatus::Succeeded | TurnStatus::Failed)
        )
    }

    pub fn is_settled(self) -> bool {
        matches!(self, TurnStatus::Succeeded | TurnStatus::Failed)
    }
}

/// One user-submit-to-bot-reply cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: String,
    pub user_text: String,
    pub status: TurnStatus,
    pub result_text: Option<String>,
    pub error_detail: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(id: impl Into<String>, user_text: impl Into<String>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_text: user_text.into(),
            status: TurnStatus::Idle,
            result_text: None,
            error_detail: None,
            submitted_at,
        }
    }

    /// Idle -> Pending
    pub(crate) fn begin(mut self) -> Self {
        debug_assert!(self.status.can_advance_to(TurnStatus::Pending));
        self.status = TurnStatus::Pending;
        self
    }

    /// Pending -> Succeeded | Failed
    pub(crate) fn settle(mut self, result: PredictionResult) -> Self {
        let next = match result {
            PredictionResult::Success { text } => {
                self.result_text = Some(text);
                TurnStatus::Succeeded
            }
            PredictionResult::Failure { detail } => {
                self.error_detail = Some(detail);
                TurnStatus::Failed
            }
        };
        debug_assert!(self.status.can_advance_to(next));
        self.status = next;
        self
    }
}

/// Machine state
///
/// `Done` is not represented: a settled turn is handed to the runtime in an
/// effect and the machine is back in `Idle` within the same transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Ready for input
    #[default]
    Idle,
    /// One request in flight; further submissions are ignored
    Pending { turn: Turn },
}

impl TurnState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TurnState::Pending { .. })
    }

    pub fn pending_turn(&self) -> Option<&Turn> {
        match self {
            TurnState::Pending { turn } => Some(turn),
            TurnState::Idle => None,
        }
    }
}
