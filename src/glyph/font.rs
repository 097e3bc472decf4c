use ab_glyph::{Font as _, FontArc, GlyphId, OutlineCurve};
use egui::{FontDefinitions, FontFamily, Pos2, pos2};

use crate::error::StudioError;

use super::flatten::OutlineSegment;

/// A font that letter outlines are read from.
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl GlyphFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StudioError> {
        let font = FontArc::try_from_vec(bytes).map_err(|err| StudioError::FontLoad(err.to_string()))?;
        Ok(Self { font })
    }

    /// The first proportional font bundled with egui.
    pub fn bundled() -> Result<Self, StudioError> {
        let definitions = FontDefinitions::default();
        let name = definitions
            .families
            .get(&FontFamily::Proportional)
            .and_then(|names| names.first())
            .ok_or_else(|| StudioError::FontLoad("no proportional font bundled".to_owned()))?;
        let data = definitions
            .font_data
            .get(name)
            .ok_or_else(|| StudioError::FontLoad(format!("missing font data for {name}")))?;
        Self::from_bytes(data.font.to_vec())
    }

    /// Outline of `ch` at `font_size` pixels per em, Y pointing down.
    ///
    /// Font outlines are Y-up; the flip `y' = max_y + min_y - y` keeps the
    /// bounding box where it was. `None` if the font has no glyph for `ch`
    /// or the glyph is empty.
    pub fn outline_segments(&self, ch: char, font_size: f32) -> Option<Vec<OutlineSegment>> {
        let id = self.font.glyph_id(ch);
        if id == GlyphId(0) {
            return None;
        }
        let outline = self.font.outline(id)?;
        if outline.curves.is_empty() {
            return None;
        }
        let units_per_em = self.font.units_per_em()?;
        let scale = font_size / units_per_em;
        let flip = outline.bounds.max.y + outline.bounds.min.y;
        let map = |p: ab_glyph::Point| -> Pos2 { pos2(p.x * scale, (flip - p.y) * scale) };

        let segments = outline
            .curves
            .iter()
            .map(|curve| match *curve {
                OutlineCurve::Line(a, b) => OutlineSegment::Line(map(a), map(b)),
                OutlineCurve::Quad(a, b, c) => OutlineSegment::Quad(map(a), map(b), map(c)),
                OutlineCurve::Cubic(a, b, c, d) => OutlineSegment::Cubic(map(a), map(b), map(c), map(d)),
            })
            .collect();
        Some(segments)
    }
}
