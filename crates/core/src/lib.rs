//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: same seed produces the same game
//! - **Testable**: every rule is exercised without a terminal
//! - **Portable**: runs anywhere (terminal, headless, benches)
//!
//! # Module structure
//!
//! - [`board`]: 10x20 grid with row clearing
//! - [`pieces`]: the shape catalog - four 4x4 rotation grids per kind
//! - [`collision`]: the legality gate consulted before every mutation
//! - [`lock`]: merging a piece into the board and clearing full rows
//! - [`spawn`]: uniform-random piece selection with a seedable RNG
//! - [`session`]: the turn/tick state machine tying it all together
//!
//! # Game rules
//!
//! This implementation keeps the simple ruleset deliberately:
//!
//! - **Uniform randomizer**: every spawn is an independent uniform draw
//!   from the seven kinds; repeats are allowed (no 7-bag)
//! - **Strict rotation**: clockwise only, in place, no wall kicks -
//!   a rotation that does not fit simply fails
//! - **Flat scoring**: 100 points per cleared line, nothing else
//! - **Gravity**: the active piece drops one row every second
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::{Command, Phase};
//!
//! let mut session = GameSession::new(12345);
//! session.apply(Command::Start);
//! assert_eq!(session.phase(), Phase::Running);
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::Rotate);
//! session.apply(Command::SoftDrop);
//! ```

pub mod board;
pub mod collision;
pub mod lock;
pub mod pieces;
pub mod session;
pub mod spawn;

pub use blockfall_types as types;

// Re-export commonly used items for convenience
pub use board::Board;
pub use collision::collides;
pub use lock::{lock_and_clear, lock_piece};
pub use pieces::{occupied_offsets, shape, ShapeGrid};
pub use session::{ActivePiece, DisplayGrid, GameSession};
pub use spawn::{SimpleRng, Spawner};
