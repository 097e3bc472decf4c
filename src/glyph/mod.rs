//! Letter outlines for tracing.
//!
//! A [`LetterGlyphPath`] is built once per traced letter: the glyph outline
//! is flattened into closed rings, and checkpoints are sampled along those
//! rings at a fixed arc-length spacing. Letters with counters ("O", "B")
//! produce several nested rings, so containment uses the even-odd rule.

mod flatten;
mod font;

use egui::{Color32, Pos2, Rect, Vec2};

use crate::geometry::{calculate_bounds, contains_even_odd, distance_to_line_segment};
use crate::renderer::{LineCap, LineJoin, PaintCommand};

pub use flatten::{OutlineSegment, flatten, sample_rings};
pub use font::GlyphFont;

#[derive(Debug, Clone, PartialEq)]
pub struct LetterGlyphPath {
    rings: Vec<Vec<Pos2>>,
    bounds: Rect,
    samples: Vec<Pos2>,
}

impl LetterGlyphPath {
    /// Extracts `ch` from `font`. `None` means the letter cannot be traced.
    pub fn extract(font: &GlyphFont, ch: char, font_size: f32, spacing: f32) -> Option<Self> {
        let segments = font.outline_segments(ch, font_size);
        let path = segments.and_then(|segments| Self::from_segments(&segments, spacing));
        if path.is_none() {
            log::warn!("No traceable outline for {ch:?}");
        }
        path
    }

    /// Builds a path from already-positioned outline segments.
    pub fn from_segments(segments: &[OutlineSegment], spacing: f32) -> Option<Self> {
        let rings = flatten(segments);
        if rings.is_empty() {
            return None;
        }
        let bounds = calculate_bounds(rings.iter().flatten(), 0.0);
        let samples = sample_rings(&rings, spacing);
        Some(Self {
            rings,
            bounds,
            samples,
        })
    }

    pub fn rings(&self) -> &[Vec<Pos2>] {
        &self.rings
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Checkpoints along the outline.
    pub fn samples(&self) -> &[Pos2] {
        &self.samples
    }

    /// Inside the filled letter, holes excluded.
    pub fn contains(&self, point: Pos2) -> bool {
        contains_even_odd(point, &self.rings)
    }

    pub fn distance_to_outline(&self, point: Pos2) -> f32 {
        self.rings
            .iter()
            .flat_map(|ring| ring.windows(2))
            .map(|pair| distance_to_line_segment(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min)
    }

    /// Inside the band of total width `band` centred on the outline.
    pub fn is_near_outline(&self, point: Pos2, band: f32) -> bool {
        self.distance_to_outline(point) <= band / 2.0
    }

    /// The outline as round-joined polylines, shifted by `offset`.
    pub fn outline_commands(&self, offset: Vec2, width: f32, color: Color32) -> Vec<PaintCommand> {
        self.rings
            .iter()
            .map(|ring| PaintCommand::Polyline {
                points: ring.iter().map(|p| *p + offset).collect(),
                width,
                color,
                cap: LineCap::Round,
                join: LineJoin::Round,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn square_ring(min: f32, max: f32) -> Vec<OutlineSegment> {
        let (a, b, c, d) = (pos2(min, min), pos2(max, min), pos2(max, max), pos2(min, max));
        vec![
            OutlineSegment::Line(a, b),
            OutlineSegment::Line(b, c),
            OutlineSegment::Line(c, d),
            OutlineSegment::Line(d, a),
        ]
    }

    #[test]
    fn test_hole_is_outside() {
        let mut segments = square_ring(0.0, 100.0);
        segments.extend(square_ring(30.0, 70.0));
        let path = LetterGlyphPath::from_segments(&segments, 20.0).unwrap();
        assert_eq!(path.rings().len(), 2);
        assert!(path.contains(pos2(10.0, 10.0)));
        assert!(!path.contains(pos2(50.0, 50.0)));
        assert!(!path.contains(pos2(150.0, 50.0)));
    }

    #[test]
    fn test_band_is_centred_on_outline() {
        let path = LetterGlyphPath::from_segments(&square_ring(0.0, 100.0), 20.0).unwrap();
        assert!(path.is_near_outline(pos2(50.0, 13.0), 28.0));
        assert!(!path.is_near_outline(pos2(50.0, 15.0), 28.0));
        assert!(path.is_near_outline(pos2(50.0, -13.0), 28.0));
    }

    #[test]
    fn test_bounds() {
        let path = LetterGlyphPath::from_segments(&square_ring(10.0, 60.0), 20.0).unwrap();
        assert_eq!(path.bounds(), Rect::from_min_max(pos2(10.0, 10.0), pos2(60.0, 60.0)));
    }

    #[test]
    fn test_empty_segments_yield_nothing() {
        assert!(LetterGlyphPath::from_segments(&[], 20.0).is_none());
    }
}
