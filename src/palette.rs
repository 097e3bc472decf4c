use egui::Color32;

/// A named crayon colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrayonColor {
    pub name: &'static str,
    pub color: Color32,
}

const fn crayon(name: &'static str, r: u8, g: u8, b: u8) -> CrayonColor {
    CrayonColor {
        name,
        color: Color32::from_rgb(r, g, b),
    }
}

/// The classic 16-crayon box.
pub const CRAYON_PALETTE: [CrayonColor; 16] = [
    crayon("Red", 238, 32, 77),
    crayon("Red-Orange", 255, 83, 73),
    crayon("Orange", 255, 117, 56),
    crayon("Yellow-Orange", 255, 174, 66),
    crayon("Yellow", 252, 232, 131),
    crayon("Yellow-Green", 197, 227, 132),
    crayon("Green", 28, 172, 120),
    crayon("Blue-Green", 25, 158, 189),
    crayon("Blue", 31, 117, 254),
    crayon("Blue-Violet", 115, 102, 189),
    crayon("Violet", 146, 110, 174),
    crayon("Red-Violet", 192, 68, 143),
    crayon("Pink", 255, 170, 204),
    crayon("Brown", 180, 103, 77),
    crayon("Black", 35, 35, 35),
    crayon("White", 255, 254, 245),
];

pub const DEFAULT_BACKGROUND: Color32 = Color32::from_rgb(255, 250, 235);

#[derive(Debug, Clone, Copy)]
pub struct StampCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub stamps: &'static [&'static str],
}

pub const STAMP_CATEGORIES: [StampCategory; 4] = [
    StampCategory {
        name: "Animals",
        icon: "🐾",
        stamps: &[
            "🐶", "🐱", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵", "🐔",
            "🐧", "🦆", "🐘", "🦒", "🦓", "🦬", "🐬", "🐠", "🦀", "🐢",
        ],
    },
    StampCategory {
        name: "Insects",
        icon: "🦋",
        stamps: &[
            "🦋", "🐛", "🐜", "🐝", "🪲", "🐞", "🦗", "🕷", "🪳", "🦟", "🪰", "🪱", "🦂", "🐌",
            "🦎", "🐡",
        ],
    },
    StampCategory {
        name: "Plants",
        icon: "🌸",
        stamps: &[
            "🌸", "🌺", "🌻", "🌹", "🌷", "🌳", "🌲", "🌴", "🌵", "🍀", "🍁", "🍃", "🌿", "🌱",
            "🌾", "🎋",
        ],
    },
    StampCategory {
        name: "Fun",
        icon: "⭐",
        stamps: &[
            "⭐", "🌈", "☀", "🌙", "❤", "🎈", "🎀", "🎁", "🏠", "🚂", "🚀", "🦄", "🍦", "🍭",
            "🎪", "🎠",
        ],
    },
];

pub const DEFAULT_STAMP: &str = "🦋";

/// Colours cycled across the letter tiles of a traced word.
pub const TILE_COLORS: [Color32; 6] = [
    Color32::from_rgb(255, 100, 120),
    Color32::from_rgb(255, 155, 50),
    Color32::from_rgb(70, 180, 100),
    Color32::from_rgb(60, 135, 235),
    Color32::from_rgb(155, 80, 220),
    Color32::from_rgb(235, 80, 175),
];

pub fn tile_color(index: usize) -> Color32 {
    TILE_COLORS[index % TILE_COLORS.len()]
}

/// Returns `color` with its alpha multiplied by `opacity`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Fully saturated colour for a hue in `[0, 1)`.
pub fn rainbow(hue: f32) -> Color32 {
    egui::ecolor::Hsva::new(hue.rem_euclid(1.0), 0.9, 1.0, 1.0).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_unique_names() {
        let mut names: Vec<_> = CRAYON_PALETTE.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CRAYON_PALETTE.len());
    }

    #[test]
    fn test_with_opacity() {
        let c = with_opacity(Color32::from_rgb(10, 20, 30), 0.5);
        assert_eq!(c.a(), 128);
        assert_eq!(with_opacity(Color32::RED, 1.0), Color32::RED);
        assert_eq!(with_opacity(Color32::RED, 3.0).a(), 255);
    }

    #[test]
    fn test_tile_color_wraps() {
        assert_eq!(tile_color(0), tile_color(6));
    }
}
