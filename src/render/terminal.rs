//! Terminal drawing for the conversation view

use super::transcript::{pending_marker, Transcript};
use crate::runtime::RenderSink;
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

const USER_LABEL: &str = "you › ";
const BOT_LABEL: &str = "bot › ";
const PROMPT: &str = "> ";

/// Draws transcript changes incrementally to a terminal.
///
/// The pending indicator and the reply share one line: frames rewrite it in
/// place, and revealed characters are appended after the label.
pub struct TerminalSink<W: Write + Send + 'static> {
    transcript: Transcript,
    out: W,
    write_failed: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            transcript: Transcript::new(),
            out,
            write_failed: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the input prompt
    pub fn prompt(&mut self) {
        self.draw(|out| queue!(out, Print(PROMPT)));
        self.flush();
    }

    fn draw(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if let Err(e) = f(&mut self.out) {
            // Report once; the conversation keeps going without a view
            if !self.write_failed {
                tracing::warn!(error = %e, "Terminal write failed");
                self.write_failed = true;
            }
        }
    }

    fn flush(&mut self) {
        self.draw(Write::flush);
    }

    fn redraw_bot_line(&mut self, tail: &str) {
        self.draw(|out| {
            queue!(
                out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Green),
                Print(BOT_LABEL),
                ResetColor,
                Print(tail)
            )
        });
    }
}

impl<W: Write + Send + 'static> RenderSink for TerminalSink<W> {
    fn append_user(&mut self, text: &str) {
        self.transcript.append_user(text);
        self.draw(|out| {
            queue!(
                out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Cyan),
                Print(USER_LABEL),
                ResetColor,
                Print(text),
                Print("\n")
            )
        });
    }

    fn clear_input(&mut self) {
        self.transcript.clear_input();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.transcript.set_input_enabled(enabled);
        // While a reply is still being revealed the prompt waits for finish_reply
        if enabled && !self.transcript.is_revealing() {
            self.prompt();
        }
    }

    fn show_pending(&mut self) {
        self.transcript.show_pending();
        self.redraw_bot_line(&pending_marker(0));
    }

    fn pending_frame(&mut self, step: usize) {
        self.transcript.pending_frame(step);
        self.redraw_bot_line(&pending_marker(step));
        self.flush();
    }

    fn hide_pending(&mut self) {
        self.transcript.hide_pending();
        self.redraw_bot_line("");
    }

    fn reveal_char(&mut self, c: char) {
        self.transcript.reveal_char(c);
        self.draw(|out| queue!(out, Print(c)));
    }

    fn finish_reply(&mut self) {
        self.transcript.finish_reply();
        self.draw(|out| queue!(out, Print("\n")));
        if self.transcript.input_enabled() {
            self.prompt();
        }
    }

    fn scroll_to_latest(&mut self) {
        self.transcript.scroll_to_latest();
        self.flush();
    }
}
