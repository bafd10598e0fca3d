//! SnakeView: maps a [`SnakeSnapshot`] into a terminal framebuffer.

use crate::core::SnakeSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::game_view::Viewport;
use crate::palette::Palette;

pub struct SnakeView {
    cell_w: u16,
    palette: Palette,
}

impl Default for SnakeView {
    fn default() -> Self {
        Self::new(2, Palette::default())
    }
}

impl SnakeView {
    pub fn new(cell_w: u16, palette: Palette) -> Self {
        Self {
            cell_w: cell_w.max(1),
            palette,
        }
    }

    /// Top-left corner of the frame for a grid of `snap`'s size.
    pub fn origin(&self, snap: &SnakeSnapshot, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.frame_size(snap);
        (
            viewport.width.saturating_sub(w) / 2,
            viewport.height.saturating_sub(h) / 2,
        )
    }

    fn frame_size(&self, snap: &SnakeSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 + 2,
        )
    }

    pub fn render_into(&self, snap: &SnakeSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let pal = &self.palette;
        fb.resize(viewport.width, viewport.height);
        fb.clear(pal.screen(pal.value).into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let (sx, sy) = self.origin(snap, viewport);

        fb.fill_rect(
            sx + 1,
            sy + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            pal.well(pal.grid_dot),
        );
        fb.draw_border(sx, sy, frame_w, frame_h, pal.screen(pal.border));

        let mut put = |pos: (i16, i16), ch: char, style: CellStyle| {
            let (x, y) = pos;
            if x < 0 || y < 0 || x >= snap.width as i16 || y >= snap.height as i16 {
                return;
            }
            let px = sx + 1 + x as u16 * self.cell_w;
            fb.fill_rect(px, sy + 1 + y as u16, self.cell_w, 1, ch, style);
        };

        if let Some(food) = snap.food {
            put(food, '●', pal.well(pal.food).bold());
        }
        for (i, seg) in snap.body.iter().enumerate() {
            let style = if i == 0 {
                pal.well(pal.snake_head).bold()
            } else {
                pal.well(pal.snake_body)
            };
            put(*seg, '█', style);
        }

        let label = pal.screen(pal.label).bold();
        let panel_x = sx.saturating_add(frame_w).saturating_add(2);
        fb.put_str(panel_x, sy, "SCORE", label);
        fb.put_u32(panel_x, sy.saturating_add(1), snap.score, pal.screen(pal.value));
        fb.put_str(
            panel_x,
            sy.saturating_add(3),
            "arrows/wasd",
            pal.screen(pal.value).dim(),
        );
        fb.put_str(
            panel_x,
            sy.saturating_add(4),
            "esc quit",
            pal.screen(pal.value).dim(),
        );

        if snap.game_over {
            fb.put_centered(
                sx,
                sy.saturating_add(frame_h / 2),
                frame_w,
                "GAME OVER",
                pal.screen(pal.overlay).bold(),
            );
        }
    }

    pub fn render(&self, snap: &SnakeSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}
