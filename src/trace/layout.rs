use egui::{Pos2, Rect, Vec2, vec2};

use crate::palette::rainbow;

const MIN_PAINT_RADIUS: f32 = 20.0;
const PAINT_RADIUS_RATIO: f32 = 0.06;

/// Placement of one letter inside the tracing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterLayout {
    pub area: Vec2,
    pub font_size: f32,
    /// Added to glyph-local coordinates to get area coordinates.
    pub origin: Vec2,
    pub paint_radius: f32,
}

impl LetterLayout {
    /// Font size for an area, before the glyph is known.
    pub fn font_size_for(area: Vec2, letter_scale: f32) -> f32 {
        area.x.min(area.y) * letter_scale
    }

    /// Centres a glyph with the given local bounds in `area`.
    pub fn centred(area: Vec2, font_size: f32, bounds: Rect) -> Self {
        let origin = vec2(
            (area.x - bounds.width()) / 2.0 - bounds.min.x,
            (area.y - bounds.height()) / 2.0 - bounds.min.y,
        );
        Self {
            area,
            font_size,
            origin,
            paint_radius: MIN_PAINT_RADIUS.max(font_size * PAINT_RADIUS_RATIO),
        }
    }

    /// Paint colour cycles through the rainbow along the area diagonal.
    pub fn paint_color(&self, point: Pos2) -> egui::Color32 {
        let span = self.area.x + self.area.y;
        let hue = if span > 0.0 { (point.x + point.y) / span } else { 0.0 };
        rainbow(hue)
    }

    /// Radius of the progress ring around the letter.
    pub fn ring_radius(&self) -> f32 {
        (self.area.x.max(self.area.y) * 0.5 + 40.0) / 2.0
    }
}
