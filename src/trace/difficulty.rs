use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::glyph::LetterGlyphPath;

/// How strictly a drag has to follow the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceDifficulty {
    #[default]
    Easy,
    Medium,
    Tricky,
}

impl TraceDifficulty {
    pub const ALL: [TraceDifficulty; 3] = [
        TraceDifficulty::Easy,
        TraceDifficulty::Medium,
        TraceDifficulty::Tricky,
    ];

    /// Width of the accepted band around the outline; 0 accepts the whole fill.
    pub fn band_width(self) -> f32 {
        match self {
            TraceDifficulty::Easy => 0.0,
            TraceDifficulty::Medium => 50.0,
            TraceDifficulty::Tricky => 28.0,
        }
    }

    /// Fraction of checkpoints to cover before scaling for outline length.
    pub fn required_coverage(self) -> f32 {
        match self {
            TraceDifficulty::Easy => 0.50,
            TraceDifficulty::Medium => 0.65,
            TraceDifficulty::Tricky => 0.80,
        }
    }

    /// Checkpoint capture radius as a fraction of the font size.
    pub fn capture_radius_fraction(self) -> f32 {
        match self {
            TraceDifficulty::Easy => 0.12,
            TraceDifficulty::Medium => 0.08,
            TraceDifficulty::Tricky => 0.05,
        }
    }

    /// Whether a glyph-local point counts as being on the letter.
    pub fn accepts(self, glyph: &LetterGlyphPath, point: Pos2) -> bool {
        match self {
            TraceDifficulty::Easy => glyph.contains(point),
            TraceDifficulty::Medium | TraceDifficulty::Tricky => {
                glyph.is_near_outline(point, self.band_width())
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TraceDifficulty::Easy => "Easy",
            TraceDifficulty::Medium => "Medium",
            TraceDifficulty::Tricky => "Tricky",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TraceDifficulty::Easy => "Color anywhere inside the letter",
            TraceDifficulty::Medium => "Stay close to the letter edges",
            TraceDifficulty::Tricky => "Trace right along the outline",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            TraceDifficulty::Easy => "🌟",
            TraceDifficulty::Medium => "✏️",
            TraceDifficulty::Tricky => "🎯",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stricter_levels_demand_more() {
        for pair in TraceDifficulty::ALL.windows(2) {
            assert!(pair[0].required_coverage() < pair[1].required_coverage());
            assert!(pair[0].capture_radius_fraction() > pair[1].capture_radius_fraction());
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&TraceDifficulty::Tricky).unwrap();
        assert_eq!(json, "\"tricky\"");
    }
}
