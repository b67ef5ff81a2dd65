//! Input mapping for terminal environments.
//!
//! A pure translation layer from crossterm key events to game commands.
//! Phase gating (which commands a paused or finished game honors) lives in
//! the session, not here.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
