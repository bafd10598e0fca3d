//! Terminal session plumbing shared by the binaries.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::input::InputHandler;
use crate::term::TerminalRenderer;

/// Longest frame fed to the game; protects against jumps after a suspend.
pub const MAX_FRAME_MS: u32 = 250;

/// Paces the frame loop and measures frame time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(frame_ms: u32) -> Self {
        Self::starting_at(frame_ms, Instant::now())
    }

    pub fn starting_at(frame_ms: u32, start: Instant) -> Self {
        Self {
            frame: Duration::from_millis(frame_ms.max(1) as u64),
            last: start,
        }
    }

    /// When input polling for the current frame should stop.
    pub fn deadline(&self) -> Instant {
        self.last + self.frame
    }

    /// Close the current frame at `now`, returning its length in milliseconds.
    pub fn tick_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last).as_millis();
        self.last = now;
        elapsed.min(MAX_FRAME_MS as u128) as u32
    }

    pub fn tick(&mut self) -> u32 {
        self.tick_at(Instant::now())
    }
}

/// Run `body` with the terminal in game mode, restoring it afterwards even
/// if `body` fails.
pub fn run_in_terminal<F>(config: &AppConfig, body: F) -> Result<()>
where
    F: FnOnce(&mut TerminalRenderer, &mut InputHandler) -> Result<()>,
{
    let mut term = TerminalRenderer::new();
    let mut input = InputHandler::new().with_key_release_timeout_ms(config.key_release_timeout_ms);

    term.enter()?;
    let result = input
        .enable_release_events()
        .map_err(anyhow::Error::from)
        .and_then(|releases| {
            info!(releases, "terminal ready");
            body(&mut term, &mut input)
        });

    // Always try to restore terminal state.
    let _ = input.restore();
    let _ = term.exit();

    if let Err(err) = &result {
        error!(error = %err, "session ended with an error");
    }
    result
}
