//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It composes
//! each frame onto a glyph surface that can be flushed to a terminal
//! backend, which keeps the drawing logic pure and unit-testable.

pub mod game_view;
pub mod renderer;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use surface::{Color, Glyph, Paint, Region, Surface, Weight};
