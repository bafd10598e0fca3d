//! Piece controller - the active tetromino and everything that moves it
//!
//! Every mutation builds a candidate piece, validates it against the board and
//! only then commits, so no invalid placement is ever stored. Gravity and soft
//! drop share one step/lock path; hard drop descends in a single loop.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::{BagRandomizer, PieceSource};
use crate::scoring::{calculate_drop_score, ScoreBoard};
use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Anchor column for newly spawned pieces
pub const SPAWN_X: i8 = BOARD_WIDTH as i8 / 2 - 2;

/// Anchor row for newly spawned pieces (straddles the top edge)
pub const SPAWN_Y: i8 = -1;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells covered by this piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// What happened after a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub kind: PieceKind,
    pub lines_cleared: usize,
    pub line_points: u32,
    /// The follow-up spawn was blocked.
    pub game_over: bool,
}

/// Result of a one-row downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Locked(LockReport),
    /// The game is over; nothing moved.
    Halted,
}

/// Result of a hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardDrop {
    pub distance: u32,
    pub lock: LockReport,
}

/// Owns the board, the piece source and the active piece.
#[derive(Debug, Clone)]
pub struct PieceController<S: PieceSource = BagRandomizer> {
    board: Board,
    source: S,
    active: Tetromino,
    ghost: Option<Tetromino>,
    scores: ScoreBoard,
    game_over: bool,
    pieces_spawned: u32,
}

impl<S: PieceSource> PieceController<S> {
    /// Start on an empty board with the first piece already spawned
    pub fn new(source: S) -> Self {
        Self::with_board(source, Board::new())
    }

    /// Start on a prepared board with the first piece already spawned
    pub fn with_board(mut source: S, board: Board) -> Self {
        let first = source.next_kind();
        let mut controller = Self {
            board,
            source,
            active: Tetromino::new(first),
            ghost: None,
            scores: ScoreBoard::default(),
            game_over: false,
            pieces_spawned: 0,
        };
        controller.spawn(first);
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn ghost(&self) -> Option<Tetromino> {
        self.ghost
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Next kind the source will hand out, if it can tell
    pub fn next_preview(&self) -> Option<PieceKind> {
        self.source.peek_kind()
    }

    /// Check if all minos are inside the walls and not on locked cells
    pub fn can_place(&self, piece: &Tetromino) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| self.board.is_free(x, y))
    }

    /// Replace the active piece with a fresh `kind` at the spawn position.
    ///
    /// Returns false and ends the game if the spawn position is blocked.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        self.active = Tetromino::new(kind);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if !self.can_place(&self.active) {
            self.game_over = true;
            info!(
                kind = kind.as_str(),
                score = self.scores.score(),
                lines = self.scores.lines(),
                "spawn blocked, game over"
            );
        } else {
            debug!(kind = kind.as_str(), "spawned piece");
        }

        self.update_ghost();
        !self.game_over
    }

    /// Shift the active piece one column. Returns whether it moved.
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.try_commit(self.active.shifted(dx, 0));
        self.update_ghost();
        moved
    }

    /// Rotate the active piece, trying the horizontal kicks in order.
    /// Leaves the piece unchanged if no kick fits.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }
        let active = self.active;
        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| self.board.is_free(x, y),
        );

        let rotated = match result {
            Some((rotation, dx)) => {
                self.active = Tetromino {
                    rotation,
                    x: active.x + dx,
                    ..active
                };
                true
            }
            None => false,
        };
        self.update_ghost();
        rotated
    }

    /// One row down, worth a point if it moves; locks otherwise.
    pub fn soft_drop_step(&mut self) -> StepOutcome {
        self.step_down(true)
    }

    /// One row down for free; locks otherwise.
    pub fn gravity_step(&mut self) -> StepOutcome {
        self.step_down(false)
    }

    fn step_down(&mut self, award: bool) -> StepOutcome {
        if self.game_over {
            return StepOutcome::Halted;
        }
        let outcome = if self.try_commit(self.active.shifted(0, 1)) {
            if award {
                self.scores.add_points(calculate_drop_score(1, false));
            }
            StepOutcome::Moved
        } else {
            StepOutcome::Locked(self.lock_and_advance())
        };
        self.update_ghost();
        outcome
    }

    /// Drop straight to the landing row, score 2 points per row, then lock.
    pub fn hard_drop(&mut self) -> Option<HardDrop> {
        if self.game_over {
            return None;
        }
        let distance = self.drop_distance(&self.active);
        self.active = self.active.shifted(0, distance);
        self.scores
            .add_points(calculate_drop_score(distance as u32, true));

        let lock = self.lock_and_advance();
        self.update_ghost();
        Some(HardDrop {
            distance: distance as u32,
            lock,
        })
    }

    /// Rows `piece` can fall before it would collide.
    pub fn drop_distance(&self, piece: &Tetromino) -> i8 {
        let mut distance = 0;
        while self.can_place(&piece.shifted(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Lock the active piece, clear lines, score them and spawn the next piece.
    pub fn lock_and_advance(&mut self) -> LockReport {
        let locked = self.active;
        self.board.lock_cells(locked.kind, &locked.cells());

        let lines_cleared = self.board.clear_full_lines();
        let line_points = self.scores.record_clear(lines_cleared);
        if lines_cleared > 0 {
            debug!(
                lines = lines_cleared,
                points = line_points,
                level = self.scores.level(),
                "cleared lines"
            );
        }

        let next = self.source.next_kind();
        let spawned = self.spawn(next);

        LockReport {
            kind: locked.kind,
            lines_cleared,
            line_points,
            game_over: !spawned,
        }
    }

    /// Recompute the landing projection of the active piece.
    pub fn update_ghost(&mut self) {
        let distance = self.drop_distance(&self.active);
        self.ghost = Some(self.active.shifted(0, distance));
    }

    fn try_commit(&mut self, candidate: Tetromino) -> bool {
        if self.can_place(&candidate) {
            self.active = candidate;
            true
        } else {
            false
        }
    }
}

impl Default for PieceController<BagRandomizer> {
    fn default() -> Self {
        Self::new(BagRandomizer::new(1))
    }
}
