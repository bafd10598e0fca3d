//! Frame input handler for terminal environments.
//!
//! Drains terminal events into a per-frame batch of [`InputEvent`]s. Supports
//! terminals that do not emit key release events by synthesizing a `KeyUp`
//! for held keys after a timeout.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{terminal, QueueableCommand};

use crate::map::map_event;
use crate::types::{InputEvent, Key};

/// Upper bound on events delivered in one frame; extra events are dropped.
pub const MAX_EVENTS_PER_FRAME: usize = 64;

pub type FrameEvents = ArrayVec<InputEvent, MAX_EVENTS_PER_FRAME>;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Keys whose held state matters to the game.
const HELD_KEYS: [Key; 3] = [Key::Left, Key::Right, Key::Down];

fn held_index(key: Key) -> Option<usize> {
    HELD_KEYS.iter().position(|k| *k == key)
}

/// Tracks held keys and turns terminal events into game input events.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Last press time for each entry of `HELD_KEYS`, `None` when up.
    held: [Option<Instant>; 3],
    key_release_timeout_ms: u32,
    reports_releases: bool,
    enhancement_pushed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: [None; 3],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            reports_releases: false,
            enhancement_pushed: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether the terminal delivers real key release events.
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn set_reports_releases(&mut self, reports: bool) {
        self.reports_releases = reports;
    }

    pub fn is_held(&self, key: Key) -> bool {
        held_index(key).is_some_and(|i| self.held[i].is_some())
    }

    /// Ask the terminal for key release events, if it supports them.
    ///
    /// Must be called after raw mode is enabled. Returns whether release
    /// events are now reported.
    pub fn enable_release_events(&mut self) -> io::Result<bool> {
        if terminal::supports_keyboard_enhancement()? {
            let mut out = io::stdout();
            out.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            out.flush()?;
            self.enhancement_pushed = true;
            self.reports_releases = true;
        }
        Ok(self.reports_releases)
    }

    /// Undo [`Self::enable_release_events`].
    pub fn restore(&mut self) -> io::Result<()> {
        if self.enhancement_pushed {
            let mut out = io::stdout();
            out.queue(PopKeyboardEnhancementFlags)?;
            out.flush()?;
            self.enhancement_pushed = false;
        }
        Ok(())
    }

    /// Feed one terminal event received at `now`.
    ///
    /// A press of a key that is already held is swallowed (it only refreshes
    /// the release timeout), so terminal auto-repeat never reaches the game.
    pub fn handle_event(&mut self, event: &Event, now: Instant, out: &mut FrameEvents) {
        let Some(mapped) = map_event(event) else {
            return;
        };

        match mapped {
            InputEvent::KeyDown(key) => {
                if let Some(i) = held_index(key) {
                    let was_held = self.held[i].is_some();
                    self.held[i] = Some(now);
                    if was_held {
                        return;
                    }
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(i) = held_index(key) {
                    if self.held[i].take().is_none() {
                        // Already released by timeout.
                        return;
                    }
                }
            }
            InputEvent::WindowClose => {}
        }
        let _ = out.try_push(mapped);
    }

    /// Synthesize releases for held keys that timed out.
    pub fn expire(&mut self, now: Instant, out: &mut FrameEvents) {
        if self.reports_releases {
            return;
        }
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for (i, slot) in self.held.iter_mut().enumerate() {
            if let Some(pressed) = *slot {
                if now.saturating_duration_since(pressed) > timeout {
                    *slot = None;
                    let _ = out.try_push(InputEvent::KeyUp(HELD_KEYS[i]));
                }
            }
        }
    }

    /// Collect input until `deadline`, appending to `out`.
    pub fn poll_frame(&mut self, deadline: Instant, out: &mut FrameEvents) -> io::Result<()> {
        loop {
            let now = Instant::now();
            self.expire(now, out);
            if out.is_full() {
                return Ok(());
            }

            let timeout = deadline.saturating_duration_since(now);
            if !event::poll(timeout)? {
                return Ok(());
            }
            let ev = event::read()?;
            self.handle_event(&ev, Instant::now(), out);
        }
    }

    /// Forget all held keys without emitting releases.
    pub fn reset(&mut self) {
        self.held = [None; 3];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
