//! Render state for the conversation view

use crate::runtime::RenderSink;

const MARKER_DOTS: usize = 3;

/// Who a bubble belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub speaker: Speaker,
    pub text: String,
    /// False while a bot reply is still being revealed
    pub complete: bool,
}

/// Visual log plus input and indicator state.
///
/// This is presentation state only; dropping it loses nothing the turn
/// machine needs.
#[derive(Debug, Clone)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
    /// Animation step of the pending indicator, when shown
    pending: Option<usize>,
    input: String,
    input_enabled: bool,
    /// Index of the row kept in view (bubbles, then the indicator)
    scroll_anchor: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            bubbles: Vec::new(),
            pending: None,
            input: String::new(),
            input_enabled: true,
            scroll_anchor: 0,
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn pending_step(&self) -> Option<usize> {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn scroll_anchor(&self) -> usize {
        self.scroll_anchor
    }

    /// A bot reply is partially written
    pub fn is_revealing(&self) -> bool {
        self.bubbles
            .last()
            .is_some_and(|b| b.speaker == Speaker::Bot && !b.complete)
    }

    fn rows(&self) -> usize {
        self.bubbles.len() + usize::from(self.pending.is_some())
    }
}

/// Marker frame for `step`: one highlighted dot cycling left to right
pub fn pending_marker(step: usize) -> String {
    (0..MARKER_DOTS)
        .map(|i| if i == step % MARKER_DOTS { '●' } else { '·' })
        .collect()
}

impl RenderSink for Transcript {
    fn append_user(&mut self, text: &str) {
        self.bubbles.push(Bubble {
            speaker: Speaker::User,
            text: text.to_string(),
            complete: true,
        });
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_pending(&mut self) {
        self.pending = Some(0);
    }

    fn pending_frame(&mut self, step: usize) {
        if self.pending.is_some() {
            self.pending = Some(step);
        }
    }

    fn hide_pending(&mut self) {
        self.pending = None;
        self.bubbles.push(Bubble {
            speaker: Speaker::Bot,
            text: String::new(),
            complete: false,
        });
    }

    fn reveal_char(&mut self, c: char) {
        if let Some(bubble) = self.bubbles.last_mut() {
            if bubble.speaker == Speaker::Bot && !bubble.complete {
                bubble.text.push(c);
            }
        }
    }

    fn finish_reply(&mut self) {
        if let Some(bubble) = self.bubbles.last_mut() {
            if bubble.speaker == Speaker::Bot {
                bubble.complete = true;
            }
        }
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_anchor = self.rows().saturating_sub(1);
    }
}
