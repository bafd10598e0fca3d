//! Terminal Tetris runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer.

use anyhow::Result;
use tracing::info;

use tui_arcade::app::{run_in_terminal, FrameClock};
use tui_arcade::config::AppConfig;
use tui_arcade::core::{GameSession, GameSnapshot, SessionControl};
use tui_arcade::input::{FrameEvents, InputHandler};
use tui_arcade::logging;
use tui_arcade::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_arcade::types::FRAME_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config)?;

    let seed = config.seed_or_random();
    info!(seed, timing = ?config.timing, "tetris starting");

    run_in_terminal(&config, |term, input| run(term, input, &config, seed))
}

fn run(
    term: &mut TerminalRenderer,
    input: &mut InputHandler,
    config: &AppConfig,
    seed: u64,
) -> Result<()> {
    let mut game = GameSession::with_config(seed, config.timing);
    let view = GameView::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut events = FrameEvents::new();
    let mut clock = FrameClock::new(FRAME_MS);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the end of the frame.
        events.clear();
        input.poll_frame(clock.deadline(), &mut events)?;

        let elapsed_ms = clock.tick();
        if game.update(events.drain(..), elapsed_ms) == SessionControl::Quit {
            info!(score = game.score(), lines = game.lines(), "tetris exiting");
            return Ok(());
        }
    }
}
