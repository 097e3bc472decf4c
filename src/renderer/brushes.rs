//! Procedural brush synthesis. Every style has exactly one table entry and one
//! code path; the live canvas and the brush preview both go through
//! [`render_style`].

use egui::{Color32, Pos2, vec2};

use super::shapes::shape_commands;
use super::{LineCap, LineJoin, PaintCommand};
use crate::brush::{BrushDescriptor, BrushStyle, PatternShape};
use crate::jitter::JitterSource;
use crate::palette::with_opacity;

/// Everything the style renderers need to know about a stroke.
#[derive(Debug, Clone, Copy)]
pub struct StrokeParams<'a> {
    pub points: &'a [Pos2],
    pub color: Color32,
    pub size: f32,
    pub brush: &'a BrushDescriptor,
    pub seed: u64,
}

/// One offset copy of the stroke polyline.
#[derive(Debug, Clone, Copy)]
struct Pass {
    dx: f32,
    dy: f32,
    opacity: f32,
}

/// Scattered dots layered on top of the passes.
#[derive(Debug, Clone, Copy)]
struct Grain {
    /// Use every `step`-th point.
    step: usize,
    dots_per_point: usize,
    /// Fraction of brush size.
    spread: f32,
    radius: (f32, f32),
    opacity: (f32, f32),
}

#[derive(Debug, Clone, Copy)]
struct LineTexture {
    passes: &'static [Pass],
    /// Fraction of brush size.
    width: f32,
    /// Per-point wobble in pixels.
    wobble: f32,
    grain: Grain,
}

const CRAYON: LineTexture = LineTexture {
    passes: &[
        Pass { dx: -2.5, dy: -1.5, opacity: 0.48 },
        Pass { dx: -1.0, dy: -0.5, opacity: 0.65 },
        Pass { dx: 0.0, dy: 0.0, opacity: 0.72 },
        Pass { dx: 1.0, dy: 0.8, opacity: 0.60 },
        Pass { dx: 2.2, dy: 1.5, opacity: 0.45 },
    ],
    width: 0.85,
    wobble: 1.5,
    grain: Grain {
        step: 2,
        dots_per_point: 1,
        spread: 0.45,
        radius: (0.5, 2.5),
        opacity: (0.04, 0.22),
    },
};

const CHALK: LineTexture = LineTexture {
    passes: &[
        Pass { dx: -1.8, dy: -1.0, opacity: 0.22 },
        Pass { dx: -0.6, dy: 0.4, opacity: 0.42 },
        Pass { dx: 0.8, dy: -0.3, opacity: 0.32 },
        Pass { dx: 1.6, dy: 1.2, opacity: 0.18 },
    ],
    width: 0.65,
    wobble: 0.0,
    grain: Grain {
        step: 1,
        dots_per_point: 2,
        spread: 0.7,
        radius: (0.4, 1.6),
        opacity: (0.03, 0.15),
    },
};

const MARKER_WIDTH: f32 = 1.6;
const MARKER_OPACITY: f32 = 0.72;
const MIN_STAMP_SIZE: f32 = 4.0;
const GLINT_RATIO: f32 = 0.09;

const GRAIN_CHANNEL: u64 = 1_000;

fn lerp((lo, hi): (f32, f32), t: f32) -> f32 {
    lo + (hi - lo) * t
}

/// Draw calls for one stroke, without the per-stroke opacity layer.
pub fn render_style(params: StrokeParams<'_>) -> Vec<PaintCommand> {
    if params.points.is_empty() {
        return Vec::new();
    }
    match params.brush.base_style {
        BrushStyle::Crayon => render_textured(&CRAYON, params),
        BrushStyle::Chalk => render_textured(&CHALK, params),
        BrushStyle::Marker => render_marker(params),
        BrushStyle::PatternStamp => render_pattern(params),
    }
}

fn render_textured(texture: &LineTexture, params: StrokeParams<'_>) -> Vec<PaintCommand> {
    // line styles show nothing until there is a segment to draw
    if params.points.len() < 2 {
        return Vec::new();
    }
    let scale = params.brush.character_scale();
    let jitter = JitterSource::new(params.seed);
    let mut commands = Vec::with_capacity(texture.passes.len() + params.points.len());

    for (pass_index, pass) in texture.passes.iter().enumerate() {
        let wobble = jitter.channel(pass_index as u64 + 1);
        let points = params
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let jx = wobble.signed(2 * i) * texture.wobble;
                let jy = wobble.signed(2 * i + 1) * texture.wobble;
                *p + vec2(pass.dx + jx, pass.dy + jy)
            })
            .collect();
        commands.push(PaintCommand::Polyline {
            points,
            width: params.size * texture.width,
            color: with_opacity(params.color, (pass.opacity * scale).min(1.0)),
            cap: LineCap::Round,
            join: LineJoin::Round,
        });
    }

    let grain = texture.grain;
    let dust = jitter.channel(GRAIN_CHANNEL);
    let spread = params.size * grain.spread;
    for (slot, point) in params.points.iter().step_by(grain.step).enumerate() {
        for dot in 0..grain.dots_per_point {
            let base = (slot * grain.dots_per_point + dot) * 4;
            let offset = vec2(dust.signed(base) * spread, dust.signed(base + 1) * spread);
            let radius = lerp(grain.radius, dust.sample(base + 2));
            let opacity = lerp(grain.opacity, dust.sample(base + 3)) * scale;
            commands.push(PaintCommand::Circle {
                center: *point + offset,
                radius,
                color: with_opacity(params.color, opacity.min(1.0)),
            });
        }
    }
    commands
}

fn render_marker(params: StrokeParams<'_>) -> Vec<PaintCommand> {
    let opacity = (MARKER_OPACITY * params.brush.character_scale()).min(1.0);
    let color = with_opacity(params.color, opacity);
    let width = params.size * MARKER_WIDTH;
    if let [only] = params.points {
        return vec![PaintCommand::Circle {
            center: *only,
            radius: width / 2.0,
            color,
        }];
    }
    vec![PaintCommand::Polyline {
        points: params.points.to_vec(),
        width,
        color,
        cap: LineCap::Round,
        join: LineJoin::Round,
    }]
}

fn render_pattern(params: StrokeParams<'_>) -> Vec<PaintCommand> {
    let brush = params.brush;
    let shape = brush.pattern_shape.unwrap_or(PatternShape::Dot);
    let spacing = brush.stamp_spacing * params.size;
    let jitter = JitterSource::new(params.seed);
    let mut last_placed: Option<Pos2> = None;
    let mut commands = Vec::new();

    for (index, point) in params.points.iter().enumerate() {
        if let Some(last) = last_placed {
            if last.distance(*point) < spacing {
                continue;
            }
        }
        last_placed = Some(*point);

        let variation = brush.size_variation * jitter.signed(index);
        let size = (params.size * (1.0 + variation)).max(MIN_STAMP_SIZE);
        commands.extend(shape_commands(shape, *point, size, params.color));

        if shape == PatternShape::Star {
            commands.push(PaintCommand::Circle {
                center: *point,
                radius: size * GLINT_RATIO,
                color: with_opacity(Color32::WHITE, 0.8),
            });
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn system(name: &str) -> BrushDescriptor {
        BrushDescriptor::system_brushes()
            .into_iter()
            .find(|b| b.name == name)
            .expect("system brush")
    }

    fn line(n: usize, step: f32) -> Vec<Pos2> {
        (0..n).map(|i| pos2(i as f32 * step, 0.0)).collect()
    }

    #[test]
    fn test_crayon_pass_and_grain_counts() {
        let brush = system("Crayon");
        let points = line(10, 5.0);
        let cmds = render_style(StrokeParams {
            points: &points,
            color: Color32::RED,
            size: 20.0,
            brush: &brush,
            seed: 1,
        });
        let polylines = cmds.iter().filter(|c| matches!(c, PaintCommand::Polyline { .. })).count();
        let dots = cmds.iter().filter(|c| matches!(c, PaintCommand::Circle { .. })).count();
        assert_eq!(polylines, 5);
        assert_eq!(dots, 5);
    }

    #[test]
    fn test_crayon_grain_ranges() {
        let brush = system("Crayon");
        let points = line(40, 3.0);
        let cmds = render_style(StrokeParams {
            points: &points,
            color: Color32::BLACK,
            size: 20.0,
            brush: &brush,
            seed: 77,
        });
        for cmd in cmds {
            if let PaintCommand::Circle { radius, color, .. } = cmd {
                assert!((0.5..=2.5).contains(&radius));
                let alpha = color.a() as f32 / 255.0;
                assert!(alpha >= 0.03 && alpha <= 0.23, "alpha {alpha}");
            }
        }
    }

    #[test]
    fn test_chalk_has_no_wobble() {
        let brush = system("Chalk");
        let points = line(6, 10.0);
        let cmds = render_style(StrokeParams {
            points: &points,
            color: Color32::WHITE,
            size: 10.0,
            brush: &brush,
            seed: 5,
        });
        let first = cmds.iter().find_map(|c| match c {
            PaintCommand::Polyline { points, width, .. } => Some((points.clone(), *width)),
            _ => None,
        });
        let (pts, width) = first.expect("chalk pass");
        assert!((width - 6.5).abs() < 1e-5);
        for (a, b) in pts.iter().zip(&points) {
            assert!(((a.x - b.x) - -1.8).abs() < 1e-5);
            assert!(((a.y - b.y) - -1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_line_styles_need_two_points() {
        for name in ["Crayon", "Chalk"] {
            let brush = system(name);
            let cmds = render_style(StrokeParams {
                points: &[pos2(1.0, 1.0)],
                color: Color32::RED,
                size: 10.0,
                brush: &brush,
                seed: 0,
            });
            assert!(cmds.is_empty(), "{name} rendered a lone point");
        }
    }

    #[test]
    fn test_marker_single_point_is_dot() {
        let brush = system("Marker");
        let cmds = render_style(StrokeParams {
            points: &[pos2(3.0, 4.0)],
            color: Color32::BLUE,
            size: 10.0,
            brush: &brush,
            seed: 0,
        });
        match cmds.as_slice() {
            [PaintCommand::Circle { center, radius, color }] => {
                assert_eq!(*center, pos2(3.0, 4.0));
                assert!((radius - 8.0).abs() < 1e-5);
                assert_eq!(color.a(), (0.72f32 * 255.0).round() as u8);
            }
            other => panic!("unexpected marker output {other:?}"),
        }
    }

    #[test]
    fn test_pattern_respects_spacing() {
        let brush = system("Dots");
        // spacing is 0.9 * 10 = 9px; points every 1px over 100px
        let points = line(101, 1.0);
        let cmds = render_style(StrokeParams {
            points: &points,
            color: Color32::RED,
            size: 10.0,
            brush: &brush,
            seed: 3,
        });
        let centers: Vec<Pos2> = cmds
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(centers.len(), 12);
        for w in centers.windows(2) {
            assert!(w[0].distance(w[1]) >= 9.0 - 1e-4);
        }
    }

    #[test]
    fn test_star_stamps_get_glint() {
        let brush = system("Sparkle");
        let cmds = render_style(StrokeParams {
            points: &[pos2(0.0, 0.0)],
            color: Color32::GOLD,
            size: 20.0,
            brush: &brush,
            seed: 0,
        });
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], PaintCommand::Circle { color, .. } if color == with_opacity(Color32::WHITE, 0.8)));
    }

    #[test]
    fn test_pattern_size_variation_bounds() {
        let brush = BrushDescriptor::new_user(
            "Wobbly",
            "🔷",
            BrushStyle::PatternStamp,
            Some(PatternShape::Circle),
            0.5,
            0.5,
        );
        let points = line(200, 10.0);
        let cmds = render_style(StrokeParams {
            points: &points,
            color: Color32::RED,
            size: 20.0,
            brush: &brush,
            seed: 11,
        });
        for cmd in cmds {
            if let PaintCommand::Circle { radius, .. } = cmd {
                assert!(radius >= 5.0 - 1e-4 && radius <= 15.0 + 1e-4);
            }
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let brush = system("Crayon");
        let points = line(30, 2.0);
        let params = StrokeParams {
            points: &points,
            color: Color32::RED,
            size: 18.0,
            brush: &brush,
            seed: 0xabc,
        };
        assert_eq!(render_style(params), render_style(params));
    }

    #[test]
    fn test_user_brush_character_scale_applies() {
        let faint = BrushDescriptor::new_user("Faint", "🖍", BrushStyle::Marker, None, 1.0, 0.0);
        let cmds = render_style(StrokeParams {
            points: &[pos2(0.0, 0.0), pos2(5.0, 0.0)],
            color: Color32::RED,
            size: 10.0,
            brush: &faint,
            seed: 0,
        });
        match &cmds[0] {
            PaintCommand::Polyline { color, .. } => {
                assert_eq!(color.a(), (0.72f32 * 0.4 * 255.0).round() as u8)
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
