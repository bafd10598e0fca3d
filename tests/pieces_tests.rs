//! Pieces module tests - shape table and kick-based rotation

use tui_arcade::core::pieces::{get_shape, get_spawn_shape, try_rotate, KICK_OFFSETS, LOCAL_GRID};
use tui_arcade::core::{PieceController, ScriptedSource};
use tui_arcade::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

fn in_bounds(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8
}

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::East),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
}

#[test]
fn test_o_piece_shapes() {
    // O piece is the same for all rotations
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north, [(1, 1), (2, 1), (1, 2), (2, 2)]);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
    assert_eq!(get_spawn_shape(PieceKind::O), north);
}

#[test]
fn test_every_cell_fits_local_grid() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            for (x, y) in get_shape(kind, rotation) {
                assert!(
                    (0..LOCAL_GRID).contains(&x) && (0..LOCAL_GRID).contains(&y),
                    "{:?} {:?} has cell ({}, {})",
                    kind,
                    rotation,
                    x,
                    y
                );
            }
        }
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_kick_order() {
    assert_eq!(KICK_OFFSETS, [0, -1, 1, -2, 2]);
}

#[test]
fn test_rotation_without_collision_uses_zero_offset() {
    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, true, in_bounds);
    assert_eq!(result, Some((Rotation::East, 0)));

    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, false, in_bounds);
    assert_eq!(result, Some((Rotation::West, 0)));
}

#[test]
fn test_rotation_at_left_wall_takes_first_fitting_kick() {
    // Vertical I hugging the left wall: column x+2 == 0.
    let result = try_rotate(PieceKind::I, Rotation::East, -2, 5, true, in_bounds);
    assert_eq!(result, Some((Rotation::South, 2)));

    // One column further right only needs +1.
    let result = try_rotate(PieceKind::I, Rotation::East, -1, 5, true, in_bounds);
    assert_eq!(result, Some((Rotation::South, 1)));
}

#[test]
fn test_rotation_fails_when_no_kick_fits() {
    // Only a single column is open: a horizontal I never fits.
    let well = |x: i8, y: i8| x == 4 && y < BOARD_HEIGHT as i8;
    assert_eq!(
        try_rotate(PieceKind::I, Rotation::East, 2, 5, true, well),
        None
    );
}

#[test]
fn test_controller_rotation_against_left_wall() {
    let mut pc = PieceController::new(ScriptedSource::new(vec![PieceKind::I]));
    assert!(pc.rotate(true));
    assert_eq!(pc.active().rotation, Rotation::East);

    while pc.move_horizontal(-1) {}
    assert_eq!(pc.active().x, -2);

    assert!(pc.rotate(true));
    assert_eq!(pc.active().rotation, Rotation::South);
    assert_eq!(pc.active().x, 0);
    assert!(pc.active().cells().iter().all(|&(x, _)| x >= 0));
}

#[test]
fn test_o_rotation_keeps_cells() {
    let mut pc = PieceController::new(ScriptedSource::new(vec![PieceKind::O]));
    let before = pc.active();
    assert!(pc.rotate(false));
    assert_eq!(pc.active().x, before.x);
    assert_eq!(pc.active().cells(), before.cells());
}
