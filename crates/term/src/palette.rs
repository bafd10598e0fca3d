//! Colors used by the views.
//!
//! A `Palette` is a plain value owned by whoever builds the view; there is no
//! global color table.

use crate::core::piece_color;
use crate::fb::{CellStyle, Rgb};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Indexed by [`PieceKind::index`].
    pub pieces: [Rgb; 7],
    pub well_bg: Rgb,
    pub grid_dot: Rgb,
    pub ghost: Rgb,
    pub border: Rgb,
    pub label: Rgb,
    pub value: Rgb,
    pub overlay: Rgb,
    pub screen_bg: Rgb,
    pub snake_head: Rgb,
    pub snake_body: Rgb,
    pub food: Rgb,
}

impl Palette {
    pub fn piece(&self, kind: PieceKind) -> Rgb {
        self.pieces[kind.index()]
    }

    pub(crate) fn well(&self, fg: Rgb) -> CellStyle {
        CellStyle::new(fg, self.well_bg)
    }

    pub(crate) fn screen(&self, fg: Rgb) -> CellStyle {
        CellStyle::new(fg, self.screen_bg)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pieces: PieceKind::ALL.map(|kind| Rgb::from(piece_color(kind))),
            well_bg: Rgb::new(30, 30, 40),
            grid_dot: Rgb::new(90, 90, 100),
            ghost: Rgb::new(140, 140, 140),
            border: Rgb::new(200, 200, 200),
            label: Rgb::new(220, 220, 220),
            value: Rgb::new(200, 200, 200),
            overlay: Rgb::new(255, 255, 255),
            screen_bg: Rgb::new(0, 0, 0),
            snake_head: Rgb::new(140, 255, 140),
            snake_body: Rgb::new(60, 200, 90),
            food: Rgb::new(230, 70, 70),
        }
    }
}
