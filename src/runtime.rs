//! Runtime for executing turns
//!
//! Hosts the pure state machine on a single task: applies transitions,
//! performs their effects against a `RenderSink`, spawns inference calls
//! and owns the two animation timers.

mod executor;
mod timer;
pub mod traits;


pub use executor::TurnRuntime;
pub use timer::{ScopedTimer, TimerTick};
pub use traits::RenderSink;

use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Period of the pending indicator's animation
pub const PENDING_FRAME_INTERVAL: Duration = Duration::from_millis(260);

/// Delay between revealed reply characters
pub const REVEAL_CHAR_INTERVAL: Duration = Duration::from_millis(15);

/// Animation pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub pending_frame: Duration,
    pub reveal_char: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pending_frame: PENDING_FRAME_INTERVAL,
            reveal_char: REVEAL_CHAR_INTERVAL,
        }
    }
}

/// Whether a reply is being awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
}

/// Requests from the front-end to the runtime task
#[derive(Debug)]
pub(crate) enum Command {
    Submit { text: String },
    /// Stop once the current turn has settled and its reply is fully shown
    Finish,
    Shutdown,
}

#[derive(Debug, Error)]
#[error("Turn runtime has stopped")]
pub struct RuntimeClosed;

/// Handle to interact with a running turn runtime
#[derive(Clone)]
pub struct TurnHandle {
    command_tx: mpsc::Sender<Command>,
    phase_rx: watch::Receiver<Phase>,
}

impl TurnHandle {
    fn new(command_tx: mpsc::Sender<Command>, phase_rx: watch::Receiver<Phase>) -> Self {
        Self {
            command_tx,
            phase_rx,
        }
    }

    /// Raise a submit event; blank text or a pending turn makes it a no-op
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeClosed> {
        self.command_tx
            .send(Command::Submit { text: text.into() })
            .await
            .map_err(|_| RuntimeClosed)
    }

    /// Let the runtime stop on its own after the turn in flight.
    ///
    /// Queued behind earlier submissions, so a message sent just before is
    /// still answered and revealed. Keep the handle alive until the runtime
    /// task returns; dropping every handle stops it at once.
    pub async fn finish(&self) {
        let _ = self.command_tx.send(Command::Finish).await;
    }

    /// Stop the runtime, cancelling any running animation
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }

    pub fn phase(&self) -> Phase {
        *self.phase_rx.borrow()
    }
}
