//! TUI Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_arcade::{core,input,term,types}` and
//! holds the pieces shared by both binaries: startup configuration, log
//! setup and terminal session handling.

pub mod app;
pub mod config;
pub mod logging;

pub use tui_arcade_core as core;
pub use tui_arcade_input as input;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;
