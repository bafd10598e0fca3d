//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::InputEvent`]s and drains them
//! once per frame, synthesizing key releases for terminals that never send
//! them.

pub mod handler;
pub mod map;

pub use tui_arcade_types as types;

pub use handler::{FrameEvents, InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS, MAX_EVENTS_PER_FRAME};
pub use map::{is_window_close, map_event, map_key_code, map_key_event};
