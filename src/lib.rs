//! relaychat - conversational front-end for a hosted inference endpoint
//!
//! A relay that forwards prediction requests to the upstream model, a client
//! that talks to it, and a turn state machine that drives a view through
//! one submit-to-reply cycle at a time.

pub mod config;
pub mod inference;
pub mod relay;
pub mod render;
pub mod runtime;
pub mod state_machine;
