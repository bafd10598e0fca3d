//! GameView: maps a Tetris [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::palette::Palette;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const CONTROLS: [&str; 6] = [
    "<- -> move",
    "v  soft drop",
    "^/x z rotate",
    "space drop",
    "p  pause",
    "esc quit",
];

/// A lightweight terminal renderer for the Tetris game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1, Palette::default())
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16, palette: Palette) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            palette,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Top-left corner of the well frame, centered in the viewport.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let pal = &self.palette;
        fb.resize(viewport.width, viewport.height);
        fb.clear(pal.screen(pal.value).into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.origin(viewport);

        fb.draw_border(start_x, start_y, frame_w, frame_h, pal.screen(pal.border));

        // Locked cells, with a dot grid for empty ones.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(kind) => self.draw_piece_cell(fb, start_x, start_y, x, y, *kind),
                    None => {
                        let style = pal.well(pal.grid_dot).dim();
                        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
                    }
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = pal.well(pal.piece(ghost.kind)).dim();
            for (x, y) in ghost.visible_cells() {
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '░', style);
            }
        }

        if let Some(active) = snap.active {
            self.draw_active(fb, start_x, start_y, &active);
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        } else if snap.game_over {
            let lines = ["GAME OVER", "ESC to quit"];
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, &lines);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_active(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, piece: &PieceSnapshot) {
        for (x, y) in piece.visible_cells() {
            self.draw_piece_cell(fb, start_x, start_y, x as u16, y as u16, piece.kind);
        }
    }

    fn draw_piece_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = self.palette.well(self.palette.piece(kind)).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let pal = &self.palette;
        let label = pal.screen(pal.label).bold();
        let value = pal.screen(pal.value);

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let style = pal.screen(pal.piece(kind)).bold();
            for (dx, dy) in get_shape(kind, Rotation::North) {
                let px = panel_x.saturating_add(dx as u16 * 2);
                let py = y.saturating_add(dy as u16);
                fb.put_str(px, py, "██", style);
            }
        }
        y = y.saturating_add(3);

        let dim = value.dim();
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        // The first line is the bold title; the rest are hints below it.
        let mid_y = start_y.saturating_add(frame_h / 2);
        let title = self.palette.screen(self.palette.overlay).bold();
        let hint = self.palette.screen(self.palette.label);
        for (i, text) in lines.iter().enumerate() {
            let style = if i == 0 { title } else { hint };
            fb.put_centered(start_x, mid_y.saturating_add(i as u16), frame_w, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    fn find(fb: &FrameBuffer, text: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(text))
    }

    #[test]
    fn test_renders_frame_and_panel() {
        let snap = GameSession::new(1).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
        assert!(find(&fb, "SCORE"));
        assert!(find(&fb, "NEXT"));
        assert!(!find(&fb, "PAUSED"));
    }

    #[test]
    fn test_locked_cell_uses_palette_color() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(PieceKind::T);
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 24));

        let (sx, sy) = view.origin(Viewport::new(80, 24));
        let cell = fb.get(sx + 1, sy + 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, view.palette().piece(PieceKind::T));
    }

    #[test]
    fn test_ghost_is_dimmed_and_hidden_under_active() {
        let snap = GameSession::new(7).snapshot();
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let fb = view.render(&snap, vp);
        let (sx, sy) = view.origin(vp);

        let ghost = snap.ghost.unwrap();
        let (x, y) = ghost.visible_cells().next().unwrap();
        let cell = fb.get(sx + 1 + x as u16 * 2, sy + 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '░');
        assert!(cell.style.dim);
    }

    #[test]
    fn test_overlays() {
        let mut snap = GameSnapshot::default();
        snap.paused = true;
        let view = GameView::default();
        assert!(find(&view.render(&snap, Viewport::new(80, 24)), "PAUSED"));

        snap.paused = false;
        snap.game_over = true;
        let fb = view.render(&snap, Viewport::new(80, 24));
        let title = (0..fb.height()).find(|&y| fb.row_text(y).contains("GAME OVER"));
        let hint = (0..fb.height()).find(|&y| fb.row_text(y).contains("ESC to quit"));
        assert!(title.is_some());
        assert_eq!(hint, title.map(|y| y + 1));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = GameSession::new(1).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.cells().len(), 15);
    }

    #[test]
    fn test_custom_palette() {
        let mut palette = Palette::default();
        palette.border = crate::fb::Rgb::new(1, 2, 3);
        let view = GameView::new(2, 1, palette);
        let fb = view.render(&GameSnapshot::default(), Viewport::new(40, 24));
        let (sx, sy) = view.origin(Viewport::new(40, 24));
        assert_eq!(fb.get(sx, sy).unwrap().style.fg, crate::fb::Rgb::new(1, 2, 3));
    }
}
