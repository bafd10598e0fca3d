//! Terminal Snake runner.

use anyhow::Result;
use tracing::info;

use tui_arcade::app::{run_in_terminal, FrameClock};
use tui_arcade::config::AppConfig;
use tui_arcade::core::{SessionControl, SnakeGame};
use tui_arcade::input::{FrameEvents, InputHandler};
use tui_arcade::logging;
use tui_arcade::term::{FrameBuffer, SnakeView, TerminalRenderer, Viewport};
use tui_arcade::types::FRAME_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config)?;

    let seed = config.seed_or_random();
    run_in_terminal(&config, |term, input| run(term, input, seed))
}

fn run(term: &mut TerminalRenderer, input: &mut InputHandler, seed: u64) -> Result<()> {
    let mut game = SnakeGame::new(seed);
    let view = SnakeView::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut events = FrameEvents::new();
    let mut clock = FrameClock::new(FRAME_MS);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        events.clear();
        input.poll_frame(clock.deadline(), &mut events)?;

        if game.update(events.drain(..), clock.tick()) == SessionControl::Quit {
            info!(score = game.score(), "snake exiting");
            return Ok(());
        }
    }
}
