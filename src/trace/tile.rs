use std::collections::BTreeSet;

use egui::{Pos2, Vec2};

use crate::glyph::LetterGlyphPath;

use super::TraceDifficulty;

/// Coverage a letter with `total` checkpoints needs.
///
/// Long outlines (W, M) would need disproportionately more tracing under a
/// flat threshold, so the requirement shrinks with `sqrt(reference / total)`
/// once `total` exceeds `reference_count`.
pub fn required_fraction(difficulty: TraceDifficulty, total: usize, reference_count: f32) -> f32 {
    if total == 0 {
        return difficulty.required_coverage();
    }
    let scaling = (reference_count / total as f32).sqrt().min(1.0);
    difficulty.required_coverage() * scaling
}

/// One letter of the word being traced.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceTile {
    pub letter: char,
    pub color_index: usize,
    pub has_popped: bool,
    pub is_complete: bool,
    /// Drag points in tracing-area coordinates.
    pub paint_points: Vec<Pos2>,
    pub total_drag: f32,
    /// Drag distance that stayed on the letter.
    pub effective_drag: f32,
    pub covered: BTreeSet<usize>,
}

/// Where a drag point landed relative to the letter.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub glyph: &'a LetterGlyphPath,
    /// Position of the glyph's local origin in the tracing area.
    pub origin: Vec2,
    pub font_size: f32,
    pub difficulty: TraceDifficulty,
}

impl TraceTile {
    pub fn new(letter: char, color_index: usize) -> Self {
        Self {
            letter,
            color_index,
            has_popped: false,
            is_complete: false,
            paint_points: Vec::new(),
            total_drag: 0.0,
            effective_drag: 0.0,
            covered: BTreeSet::new(),
        }
    }

    /// Forgets everything traced so far, e.g. when the letter is laid out
    /// again and the old checkpoints no longer apply.
    pub fn clear_progress(&mut self) {
        self.paint_points.clear();
        self.total_drag = 0.0;
        self.effective_drag = 0.0;
        self.covered.clear();
    }

    /// Accumulates one drag point. Completed tiles are frozen.
    pub fn record_drag(&mut self, point: Pos2, previous: Option<Pos2>, ctx: DragContext<'_>) {
        if self.is_complete {
            return;
        }
        self.paint_points.push(point);
        let local = point - ctx.origin;

        if let Some(previous) = previous {
            let distance = previous.distance(point);
            self.total_drag += distance;
            if ctx.difficulty.accepts(ctx.glyph, local) {
                self.effective_drag += distance;
            }
        }

        let radius = ctx.font_size * ctx.difficulty.capture_radius_fraction();
        for (index, sample) in ctx.glyph.samples().iter().enumerate() {
            if sample.distance(local) <= radius {
                self.covered.insert(index);
            }
        }
    }

    pub fn coverage(&self, total: usize) -> f32 {
        if total == 0 {
            0.0
        } else {
            self.covered.len() as f32 / total as f32
        }
    }

    /// True once enough checkpoints are covered.
    pub fn meets_coverage(&self, total: usize, difficulty: TraceDifficulty, reference_count: f32) -> bool {
        total > 0 && self.coverage(total) >= required_fraction(difficulty, total, reference_count)
    }

    /// Progress toward completion in `[0, 1]`.
    pub fn progress(&self, total: usize, difficulty: TraceDifficulty, reference_count: f32) -> f32 {
        if self.is_complete {
            return 1.0;
        }
        let required = required_fraction(difficulty, total, reference_count);
        (self.coverage(total) / required).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::OutlineSegment;
    use egui::pos2;

    fn square() -> LetterGlyphPath {
        let (a, b, c, d) = (pos2(0.0, 0.0), pos2(200.0, 0.0), pos2(200.0, 200.0), pos2(0.0, 200.0));
        let segments = [
            OutlineSegment::Line(a, b),
            OutlineSegment::Line(b, c),
            OutlineSegment::Line(c, d),
            OutlineSegment::Line(d, a),
        ];
        LetterGlyphPath::from_segments(&segments, 20.0).unwrap()
    }

    #[test]
    fn test_scaling_only_relaxes_long_outlines() {
        assert_eq!(required_fraction(TraceDifficulty::Medium, 20, 30.0), 0.65);
        assert_eq!(required_fraction(TraceDifficulty::Medium, 30, 30.0), 0.65);
        let long = required_fraction(TraceDifficulty::Medium, 120, 30.0);
        assert!((long - 0.325).abs() < 1e-6);
    }

    #[test]
    fn test_effective_drag_respects_band() {
        let glyph = square();
        let ctx = DragContext {
            glyph: &glyph,
            origin: Vec2::new(10.0, 10.0),
            font_size: 200.0,
            difficulty: TraceDifficulty::Tricky,
        };
        let mut tile = TraceTile::new('O', 0);
        // along the top edge, in area coordinates
        tile.record_drag(pos2(20.0, 10.0), None, ctx);
        tile.record_drag(pos2(60.0, 10.0), Some(pos2(20.0, 10.0)), ctx);
        // through the middle of the square
        tile.record_drag(pos2(110.0, 110.0), Some(pos2(110.0, 70.0)), ctx);
        assert_eq!(tile.total_drag, 80.0);
        assert_eq!(tile.effective_drag, 40.0);
        assert!(!tile.covered.is_empty());
    }

    #[test]
    fn test_completed_tile_is_frozen() {
        let glyph = square();
        let ctx = DragContext {
            glyph: &glyph,
            origin: Vec2::ZERO,
            font_size: 200.0,
            difficulty: TraceDifficulty::Easy,
        };
        let mut tile = TraceTile::new('O', 0);
        tile.is_complete = true;
        tile.record_drag(pos2(0.0, 0.0), None, ctx);
        assert!(tile.paint_points.is_empty());
        assert_eq!(tile.progress(40, TraceDifficulty::Easy, 30.0), 1.0);
    }
}
