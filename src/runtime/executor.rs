//! Turn runtime executor

use super::timer::{ScopedTimer, TimerTick};
use super::traits::RenderSink;
use super::{Command, Phase, Timing, TurnHandle};

use crate::inference::{settle, InferenceClient};
use crate::state_machine::{transition, Effect, Event, Turn, TurnState, TurnStatus};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Pending indicator animation for the active turn
struct PendingAnimation {
    timer: ScopedTimer,
    step: usize,
}

/// Character reveal in progress for the last reply
struct Reveal {
    timer: ScopedTimer,
    remaining: VecDeque<char>,
}

/// Owns the turn state and the render sink; everything runs on one task
pub struct TurnRuntime<C, R>
where
    C: InferenceClient + 'static,
    R: RenderSink,
{
    state: TurnState,
    client: Arc<C>,
    sink: R,
    timing: Timing,
    command_rx: mpsc::Receiver<Command>,
    /// Settled inference calls come back through here
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    tick_tx: mpsc::UnboundedSender<TimerTick>,
    tick_rx: mpsc::UnboundedReceiver<TimerTick>,
    phase_tx: watch::Sender<Phase>,
    pending: Option<PendingAnimation>,
    reveal: Option<Reveal>,
    next_timer_id: u64,
    /// Set by `Command::Finish`; the loop exits once nothing is left to show
    finishing: bool,
}

impl<C, R> TurnRuntime<C, R>
where
    C: InferenceClient + 'static,
    R: RenderSink,
{
    pub fn new(client: C, sink: R, timing: Timing) -> (Self, TurnHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);

        let runtime = Self {
            state: TurnState::Idle,
            client: Arc::new(client),
            sink,
            timing,
            command_rx,
            event_tx,
            event_rx,
            tick_tx,
            tick_rx,
            phase_tx,
            pending: None,
            reveal: None,
            next_timer_id: 0,
            finishing: false,
        };

        (runtime, TurnHandle::new(command_tx, phase_rx))
    }

    /// Process commands, results and timer ticks until shutdown.
    ///
    /// Returns the sink so callers can inspect or reuse the view.
    pub async fn run(mut self) -> R {
        tracing::info!(endpoint = %self.client.endpoint(), "Starting turn runtime");

        loop {
            if self.finishing && self.is_quiet() {
                break;
            }

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Submit { text }) => self.process_event(Event::submit(text)),
                    Some(Command::Finish) => self.finishing = true,
                    Some(Command::Shutdown) | None => break,
                },
                Some(event) = self.event_rx.recv() => self.process_event(event),
                Some(tick) = self.tick_rx.recv() => self.on_tick(tick),
            }
        }

        self.teardown();
        self.sink
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) if e.is_input_gate() => {
                tracing::debug!(reason = %e, "Submission ignored");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping event");
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        let phase = if self.state.is_pending() {
            Phase::Pending
        } else {
            Phase::Idle
        };
        self.phase_tx.send_replace(phase);
    }

    /// No turn awaiting a result and no reply still being revealed
    fn is_quiet(&self) -> bool {
        !self.state.is_pending() && self.reveal.is_none()
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendUserMessage { text } => {
                // A new turn supersedes any reveal still running
                self.flush_reveal();
                self.sink.append_user(&text);
            }
            Effect::ClearInput => self.sink.clear_input(),
            Effect::SetInputEnabled { enabled } => self.sink.set_input_enabled(enabled),
            Effect::ShowPending { turn_id } => {
                tracing::debug!(turn_id = %turn_id, "Showing pending indicator");
                self.sink.show_pending();
                let timer = self.start_timer(self.timing.pending_frame);
                self.pending = Some(PendingAnimation { timer, step: 0 });
            }
            Effect::RequestPrediction { turn_id, request } => {
                let client = Arc::clone(&self.client);
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let result = settle(&*client, &request).await;
                    // Runtime may be gone by now; the result is simply dropped
                    let _ = event_tx.send(Event::Resolve { turn_id, result });
                });
            }
            Effect::CancelPending => {
                if let Some(animation) = self.pending.take() {
                    animation.timer.cancel();
                }
                self.sink.hide_pending();
            }
            Effect::RevealReply { text } => self.start_reveal(&text),
            Effect::ScrollToLatest => self.sink.scroll_to_latest(),
            Effect::TurnFinished { turn } => log_finished(&turn),
        }
    }

    fn start_timer(&mut self, period: std::time::Duration) -> ScopedTimer {
        self.next_timer_id += 1;
        ScopedTimer::start(self.next_timer_id, period, self.tick_tx.clone())
    }

    fn start_reveal(&mut self, text: &str) {
        self.flush_reveal();

        let remaining: VecDeque<char> = text.chars().collect();
        if remaining.is_empty() {
            self.sink.finish_reply();
            return;
        }

        let timer = self.start_timer(self.timing.reveal_char);
        self.reveal = Some(Reveal { timer, remaining });
    }

    /// Write out whatever is left of the current reveal at once
    fn flush_reveal(&mut self) {
        if let Some(Reveal { timer, remaining }) = self.reveal.take() {
            timer.cancel();
            for c in remaining {
                self.sink.reveal_char(c);
            }
            self.sink.finish_reply();
            self.sink.scroll_to_latest();
        }
    }

    fn on_tick(&mut self, tick: TimerTick) {
        if let Some(animation) = &mut self.pending {
            if animation.timer.id() == tick.timer_id {
                animation.step += 1;
                self.sink.pending_frame(animation.step);
                return;
            }
        }

        let finished = match &mut self.reveal {
            Some(reveal) if reveal.timer.id() == tick.timer_id => {
                if let Some(c) = reveal.remaining.pop_front() {
                    self.sink.reveal_char(c);
                    self.sink.scroll_to_latest();
                }
                reveal.remaining.is_empty()
            }
            _ => {
                tracing::trace!(timer_id = tick.timer_id, "Ignoring stale tick");
                return;
            }
        };

        if finished {
            self.reveal = None;
            self.sink.finish_reply();
        }
    }

    fn teardown(&mut self) {
        let had_pending = self.pending.take().is_some();
        let had_reveal = self.reveal.take().is_some();
        tracing::info!(
            pending = self.state.is_pending(),
            cancelled_pending_animation = had_pending,
            cancelled_reveal = had_reveal,
            "Turn runtime stopped"
        );
    }
}

fn log_finished(turn: &Turn) {
    let elapsed_ms = (chrono::Utc::now() - turn.submitted_at).num_milliseconds();
    match turn.status {
        TurnStatus::Succeeded => tracing::info!(
            turn_id = %turn.id,
            elapsed_ms,
            "Turn completed"
        ),
        _ => tracing::warn!(
            turn_id = %turn.id,
            elapsed_ms,
            status = ?turn.status,
            error = turn.error_detail.as_deref().unwrap_or_default(),
            "Turn failed"
        ),
    }
}
