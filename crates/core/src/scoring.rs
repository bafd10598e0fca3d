//! Scoring module - Classic line-clear scoring, drop points and level curve

use crate::types::{
    GRAVITY_INTERVALS_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    SOFT_DROP_POINTS,
};

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4; anything else scores 0)
/// level: level at the time of the clear (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines] * (level + 1)
}

/// Points for a drop of `cells` rows.
pub fn calculate_drop_score(cells: u32, hard_drop: bool) -> u32 {
    if hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Level reached after clearing `lines` in total.
pub fn level_for_lines(lines: u32) -> u32 {
    (lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Gravity interval for a level, clamped to the last table entry.
pub fn get_gravity_interval_ms(level: u32) -> u32 {
    let idx = (level as usize).min(GRAVITY_INTERVALS_MS.len() - 1);
    GRAVITY_INTERVALS_MS[idx]
}

/// Running score, line count and level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    lines: u32,
    level: u32,
}

impl ScoreBoard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Record a clear of `lines` rows. Returns the points awarded.
    ///
    /// Points use the level before the clear; the level is recomputed after.
    pub fn record_clear(&mut self, lines: usize) -> u32 {
        let points = calculate_line_score(lines, self.level);
        self.add_points(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.level = level_for_lines(self.lines);
        points
    }
}
