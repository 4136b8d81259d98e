//! Cancellable periodic timers owned by the runtime

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Delivered to the runtime each period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub timer_id: u64,
}

/// Periodic tick source that stops when cancelled or dropped.
///
/// Ticks carry the timer's id; a tick already queued when the timer is
/// cancelled is recognizable as stale by its id.
#[derive(Debug)]
pub struct ScopedTimer {
    id: u64,
    token: CancellationToken,
}

impl ScopedTimer {
    /// First tick fires one `period` after start
    pub fn start(id: u64, period: Duration, tick_tx: mpsc::UnboundedSender<TimerTick>) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if tick_tx.send(TimerTick { timer_id: id }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { id, token }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
