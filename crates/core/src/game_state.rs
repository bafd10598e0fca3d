//! Game session module - one Tetris game from first spawn to game over
//!
//! This module ties together the piece controller and the timing controller.
//! Each frame it turns drained input events into intents, applies them, lets
//! held-key repeats and gravity run, and exposes an immutable snapshot.

use tracing::{info, trace};

use crate::piece::{PieceController, StepOutcome};
use crate::rng::{BagRandomizer, PieceSource};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::timing::{HorizontalDirection, RepeatAction, TimingController};
use crate::types::{GameAction, InputEvent, TimingConfig};

/// Whether the frame loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSource = BagRandomizer> {
    controller: PieceController<S>,
    timing: TimingController,
    paused: bool,
    quit: bool,
    game_over_logged: bool,
}

impl GameSession<BagRandomizer> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, TimingConfig::default())
    }

    pub fn with_config(seed: u64, config: TimingConfig) -> Self {
        info!(seed, "starting tetris session");
        Self::from_parts(
            PieceController::new(BagRandomizer::new(seed)),
            TimingController::with_config(config),
        )
    }
}

impl<S: PieceSource> GameSession<S> {
    pub fn from_parts(controller: PieceController<S>, timing: TimingController) -> Self {
        Self {
            controller,
            timing,
            paused: false,
            quit: false,
            game_over_logged: false,
        }
    }

    pub fn controller(&self) -> &PieceController<S> {
        &self.controller
    }

    pub fn timing(&self) -> &TimingController {
        &self.timing
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.controller.game_over()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn score(&self) -> u32 {
        self.controller.scores().score()
    }

    pub fn level(&self) -> u32 {
        self.controller.scores().level()
    }

    pub fn lines(&self) -> u32 {
        self.controller.scores().lines()
    }

    /// Run one frame: apply this frame's events, then advance clocks.
    pub fn update<I>(&mut self, events: I, elapsed_ms: u32) -> SessionControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if let Some(action) = GameAction::from_event(event) {
                self.apply_action(action);
            }
            if self.quit {
                return SessionControl::Quit;
            }
        }

        self.advance(elapsed_ms);
        SessionControl::Continue
    }

    /// Apply a single intent. Returns whether it was accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let halted = self.paused || self.game_over();
        if halted && !action.allowed_when_halted() {
            return false;
        }
        trace!(action = action.as_str(), "apply action");

        match action {
            GameAction::Quit => {
                info!(score = self.score(), "quit requested");
                self.quit = true;
            }
            GameAction::Pause => {
                if self.game_over() {
                    return false;
                }
                self.paused = !self.paused;
                info!(paused = self.paused, "pause toggled");
            }
            GameAction::MoveLeft => self.press_horizontal(HorizontalDirection::Left),
            GameAction::MoveRight => self.press_horizontal(HorizontalDirection::Right),
            GameAction::ReleaseLeft => self.timing.release_horizontal(HorizontalDirection::Left),
            GameAction::ReleaseRight => self.timing.release_horizontal(HorizontalDirection::Right),
            GameAction::SoftDropStart => self.timing.press_soft_drop(),
            GameAction::SoftDropStop => self.timing.release_soft_drop(),
            GameAction::RotateCw => {
                self.controller.rotate(true);
            }
            GameAction::RotateCcw => {
                self.controller.rotate(false);
            }
            GameAction::HardDrop => {
                if self.controller.hard_drop().is_some() {
                    self.timing.reset_gravity();
                }
            }
        }

        self.note_game_over();
        true
    }

    /// Advance held-key repeats and gravity by `elapsed_ms`.
    ///
    /// Clocks stand still while paused or after game over.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.paused || self.game_over() {
            return;
        }

        for repeat in self.timing.tick(elapsed_ms) {
            if self.game_over() {
                break;
            }
            match repeat {
                RepeatAction::MoveLeft => self.shift(HorizontalDirection::Left),
                RepeatAction::MoveRight => self.shift(HorizontalDirection::Right),
                RepeatAction::SoftDrop => {
                    let outcome = self.controller.soft_drop_step();
                    if outcome != StepOutcome::Halted {
                        self.timing.reset_gravity();
                    }
                }
            }
        }

        if !self.game_over() && self.timing.take_gravity(self.level()) {
            self.controller.gravity_step();
        }

        self.note_game_over();
    }

    fn press_horizontal(&mut self, dir: HorizontalDirection) {
        self.shift(dir);
        self.timing.press_horizontal(dir);
    }

    fn shift(&mut self, dir: HorizontalDirection) {
        self.controller.move_horizontal(dir.dx());
    }

    fn note_game_over(&mut self) {
        if self.game_over() && !self.game_over_logged {
            self.game_over_logged = true;
            self.timing.release_all();
            info!(
                score = self.score(),
                lines = self.lines(),
                level = self.level(),
                "game over"
            );
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.controller.board().write_grid(&mut out.board);
        out.active = Some(PieceSnapshot::from(self.controller.active()));
        out.ghost = self.controller.ghost().map(PieceSnapshot::from);
        out.next = self.controller.next_preview();
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession<BagRandomizer> {
    fn default() -> Self {
        Self::new(1)
    }
}
