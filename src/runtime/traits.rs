//! Trait abstractions for runtime I/O
//!
//! The runtime drives the view only through `RenderSink`, which lets tests
//! swap in a recorder and lets any front-end supply its own drawing.

/// Side-effecting view operations, called from the runtime task only
pub trait RenderSink: Send + 'static {
    /// Append the user's message bubble
    fn append_user(&mut self, text: &str);

    /// Empty the input buffer
    fn clear_input(&mut self);

    /// Lock or unlock input while a reply is awaited
    fn set_input_enabled(&mut self, enabled: bool);

    /// Append the pending indicator
    fn show_pending(&mut self);

    /// Advance the indicator's animation; `step` counts up from 1
    fn pending_frame(&mut self, step: usize);

    /// Remove the indicator, leaving an empty reply bubble in its place
    fn hide_pending(&mut self);

    /// Append one character to the reply bubble
    fn reveal_char(&mut self, c: char);

    /// The reply bubble is complete
    fn finish_reply(&mut self) {}

    /// Keep the newest bubble in view
    fn scroll_to_latest(&mut self);
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn append_user(&mut self, text: &str) {
        (**self).append_user(text);
    }

    fn clear_input(&mut self) {
        (**self).clear_input();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        (**self).set_input_enabled(enabled);
    }

    fn show_pending(&mut self) {
        (**self).show_pending();
    }

    fn pending_frame(&mut self, step: usize) {
        (**self).pending_frame(step);
    }

    fn hide_pending(&mut self) {
        (**self).hide_pending();
    }

    fn reveal_char(&mut self, c: char) {
        (**self).reveal_char(c);
    }

    fn finish_reply(&mut self) {
        (**self).finish_reply();
    }

    fn scroll_to_latest(&mut self) {
        (**self).scroll_to_latest();
    }
}
