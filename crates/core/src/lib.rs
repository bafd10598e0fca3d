//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and simulation for both games. It has **no
//! dependencies** on the terminal or any other I/O:
//!
//! - **Deterministic**: time is injected in milliseconds and every random
//!   source is seedable, so the same seed and event stream replay exactly
//! - **Testable**: each rule lives in a small module with its own tests
//! - **Portable**: the frontend only sees [`GameSnapshot`] / [`SnakeSnapshot`]
//!
//! # Module Structure
//!
//! - [`pieces`]: shape table, colors and the kick list used for rotation
//! - [`board`]: 10x20 grid with collision queries and line clearing
//! - [`rng`]: 7-bag randomizer behind the [`PieceSource`] trait
//! - [`scoring`]: line/drop points, level progression and gravity table
//! - [`piece`]: the falling piece, ghost, locking and spawning
//! - [`timing`]: gravity clock plus DAS/ARR and soft-drop repeat
//! - [`game_state`]: one Tetris session, frame by frame
//! - [`snake`]: the Snake game
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{GameSession, SessionControl};
//! use tui_arcade_core::types::{InputEvent, Key};
//!
//! let mut game = GameSession::new(12345);
//! let control = game.update([InputEvent::KeyDown(Key::Space)], 16);
//!
//! assert_eq!(control, SessionControl::Continue);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snake;
pub mod snapshot;
pub mod timing;

pub use tui_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardGrid};
pub use game_state::{GameSession, SessionControl};
pub use piece::{HardDrop, LockReport, PieceController, StepOutcome, Tetromino};
pub use pieces::{get_shape, piece_color, try_rotate};
pub use rng::{BagRandomizer, PieceSource, ScriptedSource};
pub use scoring::ScoreBoard;
pub use snake::{Direction, SnakeEnd, SnakeGame, SnakeSnapshot};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timing::{HorizontalDirection, RepeatAction, TimingController};
