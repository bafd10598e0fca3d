//! Snake - a single moving body on a fixed grid
//!
//! Same frame pattern as Tetris: drained input events, one fixed cadence
//! (the step clock) and an immutable snapshot for the renderer.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::game_state::SessionControl;
use crate::types::{InputEvent, Key, SNAKE_GRID_HEIGHT, SNAKE_GRID_WIDTH, SNAKE_STEP_MS};

/// Grid position (x, y), origin at the top-left.
pub type Position = (i16, i16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up | Key::Char('w') => Some(Direction::Up),
            Key::Down | Key::Char('s') => Some(Direction::Down),
            Key::Left | Key::Char('a') => Some(Direction::Left),
            Key::Right | Key::Char('d') => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Why the last step ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEnd {
    Wall,
    SelfHit,
    BoardFull,
}

/// Read-only view of a Snake game for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub width: u8,
    pub height: u8,
    /// Head first.
    pub body: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    width: i16,
    height: i16,
    body: VecDeque<Position>,
    food: Option<Position>,
    direction: Direction,
    queued: Option<Direction>,
    score: u32,
    ended: Option<SnakeEnd>,
    quit: bool,
    step_ms: u32,
    step_timer_ms: u32,
    rng: StdRng,
}

impl SnakeGame {
    /// Standard 20x20 game, snake of three heading right from the centre
    pub fn new(seed: u64) -> Self {
        Self::with_size(seed, SNAKE_GRID_WIDTH, SNAKE_GRID_HEIGHT)
    }

    pub fn with_size(seed: u64, width: u8, height: u8) -> Self {
        let (w, h) = (width.max(4) as i16, height.max(1) as i16);
        let (cx, cy) = (w / 2, h / 2);
        let mut game = Self {
            width: w,
            height: h,
            body: VecDeque::from([(cx, cy), (cx - 1, cy), (cx - 2, cy)]),
            food: None,
            direction: Direction::Right,
            queued: None,
            score: 0,
            ended: None,
            quit: false,
            step_ms: SNAKE_STEP_MS,
            step_timer_ms: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        info!(seed, "starting snake session");
        game.place_food();
        game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.ended.is_some()
    }

    pub fn end_reason(&self) -> Option<SnakeEnd> {
        self.ended
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move the food, e.g. to set up a test. Ignored if the cell is on the snake.
    pub fn set_food(&mut self, pos: Position) {
        if !self.body.contains(&pos) {
            self.food = Some(pos);
        }
    }

    /// Run one frame.
    pub fn update<I>(&mut self, events: I, elapsed_ms: u32) -> SessionControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(event);
            if self.quit {
                return SessionControl::Quit;
            }
        }

        if !self.game_over() {
            self.step_timer_ms = self.step_timer_ms.saturating_add(elapsed_ms);
            if self.step_timer_ms >= self.step_ms {
                self.step_timer_ms = 0;
                self.step();
            }
        }
        SessionControl::Continue
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::WindowClose | InputEvent::KeyDown(Key::Escape) => {
                info!(score = self.score, "quit requested");
                self.quit = true;
            }
            InputEvent::KeyDown(key) if !self.game_over() => {
                if let Some(dir) = Direction::from_key(key) {
                    self.turn(dir);
                }
            }
            _ => {}
        }
    }

    /// Queue a turn for the next step. Reversing onto the body is ignored.
    pub fn turn(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.queued = Some(dir);
        }
    }

    /// Advance the snake by one cell.
    pub fn step(&mut self) {
        if self.game_over() {
            return;
        }
        if let Some(dir) = self.queued.take() {
            self.direction = dir;
        }

        let (hx, hy) = self.head();
        let (dx, dy) = self.direction.delta();
        let head = (hx + dx, hy + dy);

        if head.0 < 0 || head.0 >= self.width || head.1 < 0 || head.1 >= self.height {
            self.end(SnakeEnd::Wall);
            return;
        }
        // The tail still counts: it has not moved yet.
        if self.body.contains(&head) {
            self.end(SnakeEnd::SelfHit);
            return;
        }

        self.body.push_front(head);
        if self.food == Some(head) {
            self.score += 1;
            debug!(score = self.score, len = self.body.len(), "ate food");
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    fn place_food(&mut self) {
        let free: Vec<Position> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();

        self.food = free.choose(&mut self.rng).copied();
        if self.food.is_none() {
            self.end(SnakeEnd::BoardFull);
        }
    }

    fn end(&mut self, reason: SnakeEnd) {
        self.ended = Some(reason);
        info!(score = self.score, ?reason, "snake game over");
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            width: self.width as u8,
            height: self.height as u8,
            body: self.body.iter().copied().collect(),
            food: self.food,
            score: self.score,
            game_over: self.game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EVENTS: [InputEvent; 0] = [];

    #[test]
    fn test_initial_layout() {
        let game = SnakeGame::new(1);
        let snap = game.snapshot();
        assert_eq!(snap.body, vec![(10, 10), (9, 10), (8, 10)]);
        let food = snap.food.unwrap();
        assert!(!snap.body.contains(&food));
        assert!(food.0 >= 0 && food.0 < 20 && food.1 >= 0 && food.1 < 20);
    }

    #[test]
    fn test_steps_on_cadence() {
        let mut game = SnakeGame::new(1);
        game.set_food((0, 0));
        game.update(NO_EVENTS, 149);
        assert_eq!(game.head(), (10, 10));
        game.update(NO_EVENTS, 1);
        assert_eq!(game.head(), (11, 10));
        assert_eq!(game.body_len(), 3);
    }

    #[test]
    fn test_reverse_turn_ignored() {
        let mut game = SnakeGame::new(1);
        game.set_food((0, 0));
        game.update([InputEvent::KeyDown(Key::Left)], 150);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.head(), (11, 10));

        game.update([InputEvent::KeyDown(Key::Char('w'))], 150);
        assert_eq!(game.direction(), Direction::Up);
        assert_eq!(game.head(), (11, 9));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = SnakeGame::new(1);
        game.set_food((11, 10));
        game.step();
        assert_eq!(game.score(), 1);
        assert_eq!(game.body_len(), 4);
        assert_ne!(game.food(), Some((11, 10)));
    }

    #[test]
    fn test_wall_ends_game() {
        let mut game = SnakeGame::new(1);
        game.set_food((0, 0));
        for _ in 0..10 {
            game.step();
        }
        assert_eq!(game.end_reason(), Some(SnakeEnd::Wall));
        assert_eq!(game.head(), (19, 10));

        // Input is ignored except quit.
        game.update([InputEvent::KeyDown(Key::Up)], 1000);
        assert_eq!(game.head(), (19, 10));
        assert_eq!(
            game.update([InputEvent::KeyDown(Key::Escape)], 0),
            SessionControl::Quit
        );
    }

    #[test]
    fn test_self_hit_ends_game() {
        let mut game = SnakeGame::new(1);
        game.set_food((0, 0));
        // Grow to five segments, then curl back into the body.
        for food in [(11, 10), (12, 10)] {
            game.set_food(food);
            game.step();
        }
        game.set_food((0, 0));
        game.turn(Direction::Down);
        game.step();
        game.turn(Direction::Left);
        game.step();
        game.turn(Direction::Up);
        game.step();
        assert_eq!(game.end_reason(), Some(SnakeEnd::SelfHit));
    }

    #[test]
    fn test_window_close_quits() {
        let mut game = SnakeGame::new(1);
        assert_eq!(
            game.update([InputEvent::WindowClose], 0),
            SessionControl::Quit
        );
    }
}
