//! Render layer
//!
//! `Transcript` is the view state a declarative front-end draws from;
//! `TerminalSink` draws it on a terminal as it changes.

mod terminal;
mod transcript;

pub use terminal::TerminalSink;
pub use transcript::{pending_marker, Bubble, Speaker, Transcript};
