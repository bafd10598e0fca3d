//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both games.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal input, rendering).
//!
//! # Board Dimensions
//!
//! Standard Tetris playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (`BOARD_WIDTH / 2 - 2`, -1), straddling the top edge
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame budget (~60 FPS) |
//! | `DEFAULT_DAS_MS` | 180 | Delay before lateral auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between lateral auto-repeats |
//! | `DEFAULT_SOFT_DROP_MS` | 30 | Interval between soft-drop steps while Down is held |
//! | `SNAKE_STEP_MS` | 150 | Snake movement cadence |
//!
//! # Gravity by Level
//!
//! Gravity increases with level (milliseconds per row), see [`GRAVITY_INTERVALS_MS`].
//! Levels past the end of the table use the last entry.
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_index(2).unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.index(), 2);
//!
//! let rotated = Rotation::North.rotate_cw();
//! assert_eq!(rotated, Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame budget in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 180;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeat interval while Down is held.
pub const DEFAULT_SOFT_DROP_MS: u32 = 30;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 19;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval per level (milliseconds per row).
///
/// Index = level. Levels beyond the table use the last entry.
pub const GRAVITY_INTERVALS_MS: [u32; 20] = [
    800, 700, 600, 500, 400, 350, 300, 250, 200, 180, 160, 140, 120, 100, 90, 80, 75, 70, 65, 60,
];

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row for a successful soft-drop step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// Snake grid width in cells
pub const SNAKE_GRID_WIDTH: u8 = 20;

/// Snake grid height in cells
pub const SNAKE_GRID_HEIGHT: u8 = 20;

/// Snake step cadence in milliseconds
pub const SNAKE_STEP_MS: u32 = 150;

/// Tetromino piece kinds
///
/// The declaration order is the kind index used by the shape and color tables
/// (I=0, O=1, T=2, S=3, Z=4, J=5, L=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Table index of this kind (0..=6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a table index, `None` outside 0..=6
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states (North = spawn orientation, index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Table index of this rotation (0..=3)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Logical keys recognized by the games.
///
/// Letter keys are carried lowercase in [`Key::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    Char(char),
}

/// A raw input event, as drained from the input source once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    WindowClose,
}

/// Tetris intents produced from input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    ReleaseLeft,
    ReleaseRight,
    SoftDropStart,
    SoftDropStop,
    RotateCw,
    RotateCcw,
    HardDrop,
    Pause,
    Quit,
}

impl GameAction {
    /// Map an input event to an intent. Unrecognized keys produce `None`.
    pub fn from_event(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::WindowClose => Some(GameAction::Quit),
            InputEvent::KeyDown(key) => match key {
                Key::Left => Some(GameAction::MoveLeft),
                Key::Right => Some(GameAction::MoveRight),
                Key::Down => Some(GameAction::SoftDropStart),
                Key::Up | Key::Char('x') => Some(GameAction::RotateCw),
                Key::Char('z') => Some(GameAction::RotateCcw),
                Key::Space => Some(GameAction::HardDrop),
                Key::Char('p') => Some(GameAction::Pause),
                Key::Escape => Some(GameAction::Quit),
                _ => None,
            },
            InputEvent::KeyUp(key) => match key {
                Key::Left => Some(GameAction::ReleaseLeft),
                Key::Right => Some(GameAction::ReleaseRight),
                Key::Down => Some(GameAction::SoftDropStop),
                _ => None,
            },
        }
    }

    /// Whether this intent is accepted while the session is paused or over.
    ///
    /// Releases always pass so a key let go during a pause is not left held.
    pub fn allowed_when_halted(&self) -> bool {
        matches!(
            self,
            GameAction::Pause
                | GameAction::Quit
                | GameAction::ReleaseLeft
                | GameAction::ReleaseRight
                | GameAction::SoftDropStop
        )
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::ReleaseLeft => "releaseLeft",
            GameAction::ReleaseRight => "releaseRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
        }
    }
}

/// Held-key timing parameters (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub das_ms: u32,
    pub arr_ms: u32,
    pub soft_drop_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_ms: DEFAULT_SOFT_DROP_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_table_is_strictly_decreasing() {
        assert_eq!(GRAVITY_INTERVALS_MS[0], 800);
        assert_eq!(GRAVITY_INTERVALS_MS[19], 60);
        for pair in GRAVITY_INTERVALS_MS.windows(2) {
            assert!(pair[0] > pair[1], "{:?}", pair);
        }
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn rotation_cw_and_ccw_are_inverse() {
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            assert_eq!(r.rotate_cw().index(), (r.index() + 1) % 4);
            assert_eq!(r.rotate_ccw().index(), (r.index() + 3) % 4);
        }
    }

    #[test]
    fn key_mapping() {
        use InputEvent::*;
        assert_eq!(GameAction::from_event(KeyDown(Key::Left)), Some(GameAction::MoveLeft));
        assert_eq!(GameAction::from_event(KeyDown(Key::Up)), Some(GameAction::RotateCw));
        assert_eq!(GameAction::from_event(KeyDown(Key::Char('x'))), Some(GameAction::RotateCw));
        assert_eq!(GameAction::from_event(KeyDown(Key::Char('z'))), Some(GameAction::RotateCcw));
        assert_eq!(GameAction::from_event(KeyDown(Key::Space)), Some(GameAction::HardDrop));
        assert_eq!(GameAction::from_event(KeyDown(Key::Char('p'))), Some(GameAction::Pause));
        assert_eq!(GameAction::from_event(KeyDown(Key::Escape)), Some(GameAction::Quit));
        assert_eq!(GameAction::from_event(KeyUp(Key::Down)), Some(GameAction::SoftDropStop));
        assert_eq!(GameAction::from_event(WindowClose), Some(GameAction::Quit));

        // Unmapped keys and releases of tap keys are dropped.
        assert_eq!(GameAction::from_event(KeyDown(Key::Char('q'))), None);
        assert_eq!(GameAction::from_event(KeyUp(Key::Space)), None);
    }

    #[test]
    fn releases_pass_while_halted() {
        assert!(GameAction::ReleaseLeft.allowed_when_halted());
        assert!(GameAction::SoftDropStop.allowed_when_halted());
        assert!(GameAction::Pause.allowed_when_halted());
        assert!(!GameAction::HardDrop.allowed_when_halted());
        assert!(!GameAction::MoveLeft.allowed_when_halted());
    }
}
