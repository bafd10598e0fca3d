use crate::board::BoardGrid;
use crate::piece::Tetromino;
use crate::pieces::get_shape;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Absolute board cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        get_shape(self.kind, self.rotation).map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Cells that fall inside the visible grid
    pub fn visible_cells(&self) -> impl Iterator<Item = (u8, u8)> {
        self.cells().into_iter().filter_map(|(x, y)| {
            (x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8)
                .then_some((x as u8, y as u8))
        })
    }
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a Tetris session for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next: Option<PieceKind>,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: None,
            paused: false,
            game_over: false,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}
