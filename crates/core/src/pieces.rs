//! Pieces module - Tetromino shape table and wall-kick search
//!
//! Every rotation state is a precomputed entry in a 4x4 local grid; nothing is
//! rotated at runtime. Rotation resolves collisions with a fixed horizontal
//! kick sequence instead of the SRS tables.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor (local x, local y)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece anchor
pub type PieceShape = [MinoOffset; 4];

/// Side of the local grid every shape fits in.
pub const LOCAL_GRID: i8 = 4;

/// Horizontal offsets tried, in order, when a rotation collides.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Shape table indexed by `[kind][rotation]`.
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
    ],
    // T
    [
        [(1, 1), (0, 2), (1, 2), (2, 2)],
        [(1, 1), (1, 2), (2, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (1, 3)],
        [(1, 1), (0, 2), (1, 2), (1, 3)],
    ],
    // S
    [
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(1, 1), (1, 2), (2, 2), (2, 3)],
        [(1, 2), (2, 2), (0, 3), (1, 3)],
        [(0, 1), (0, 2), (1, 2), (1, 3)],
    ],
    // Z
    [
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(2, 1), (1, 2), (2, 2), (1, 3)],
        [(0, 2), (1, 2), (1, 3), (2, 3)],
        [(1, 1), (0, 2), (1, 2), (0, 3)],
    ],
    // J
    [
        [(0, 1), (0, 2), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (2, 3)],
        [(1, 1), (1, 2), (0, 3), (1, 3)],
    ],
    // L
    [
        [(2, 1), (0, 2), (1, 2), (2, 2)],
        [(1, 1), (1, 2), (1, 3), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (0, 3)],
        [(0, 1), (1, 1), (1, 2), (1, 3)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Get the spawn shape (rotation 0) for a piece kind
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Display color tag of a piece kind (RGB).
pub fn piece_color(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::I => (0, 240, 240),
        PieceKind::O => (240, 240, 0),
        PieceKind::T => (160, 0, 240),
        PieceKind::S => (0, 240, 0),
        PieceKind::Z => (240, 0, 0),
        PieceKind::J => (0, 0, 240),
        PieceKind::L => (240, 160, 0),
    }
}

/// Try to rotate a piece, resolving collisions with [`KICK_OFFSETS`].
///
/// Returns `Some((new_rotation, dx))` for the first horizontal offset at which
/// every mino satisfies `fits`, or `None` if all offsets collide.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    fits: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, i8)> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };
    let shape = get_shape(kind, new_rotation);

    KICK_OFFSETS.iter().copied().find_map(|dx| {
        shape
            .iter()
            .all(|&(mx, my)| fits(x + dx + mx, y + my))
            .then_some((new_rotation, dx))
    })
}
