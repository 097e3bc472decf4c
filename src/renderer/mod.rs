//! Turns strokes and stamps into an ordered list of vector draw calls that any
//! 2D rasterizer can execute back to front.

mod brushes;
mod painter;
pub mod shapes;

use egui::{Color32, Pos2, Rect, pos2};

use crate::brush::BrushDescriptor;
use crate::stroke::{StampPlacement, Stroke};

pub use brushes::{StrokeParams, render_style};
pub use painter::paint_commands;

/// Ratio of the emoji font size to the stamp box.
pub const STAMP_TEXT_RATIO: f32 = 0.72;
const ERASER_WIDTH: f32 = 1.6;
const PREVIEW_SEED: u64 = 0x5eed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        color: Color32,
    },
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
        cap: LineCap,
        join: LineJoin,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Polygon {
        points: Vec<Pos2>,
        color: Color32,
    },
    Glyph {
        text: String,
        center: Pos2,
        font_size: f32,
        color: Color32,
    },
    /// Children composited as one unit, then blended at `opacity`.
    Layer {
        opacity: f32,
        commands: Vec<PaintCommand>,
    },
}

impl PaintCommand {
    /// Visits every leaf primitive with the product of the enclosing layer opacities.
    pub fn for_each_leaf(&self, parent_opacity: f32, f: &mut impl FnMut(&PaintCommand, f32)) {
        match self {
            PaintCommand::Layer { opacity, commands } => {
                for child in commands {
                    child.for_each_leaf(parent_opacity * opacity, f);
                }
            }
            leaf => f(leaf, parent_opacity),
        }
    }

    /// Colour of a leaf primitive; `None` for layers.
    pub fn color(&self) -> Option<Color32> {
        match self {
            PaintCommand::FillRect { color, .. }
            | PaintCommand::Polyline { color, .. }
            | PaintCommand::Circle { color, .. }
            | PaintCommand::Polygon { color, .. }
            | PaintCommand::Glyph { color, .. } => Some(*color),
            PaintCommand::Layer { .. } => None,
        }
    }
}

/// Draw calls for one stroke. Every style except the eraser is wrapped in a
/// layer carrying the stroke opacity.
pub fn render_stroke(stroke: &Stroke) -> Vec<PaintCommand> {
    if stroke.points().is_empty() {
        return Vec::new();
    }
    if stroke.is_eraser() {
        return render_hard_erase(stroke);
    }
    let commands = render_style(StrokeParams {
        points: stroke.points(),
        color: stroke.color(),
        size: stroke.brush_size(),
        brush: stroke.brush(),
        seed: stroke.seed(),
    });
    if commands.is_empty() {
        return commands;
    }
    vec![PaintCommand::Layer {
        opacity: stroke.opacity(),
        commands,
    }]
}

fn render_hard_erase(stroke: &Stroke) -> Vec<PaintCommand> {
    let [r, g, b, _] = stroke.color().to_srgba_unmultiplied();
    let color = Color32::from_rgb(r, g, b);
    match stroke.points() {
        [] => Vec::new(),
        [only] => vec![PaintCommand::Circle {
            center: *only,
            radius: stroke.brush_size() / 2.0,
            color,
        }],
        points => vec![PaintCommand::Polyline {
            points: points.to_vec(),
            width: stroke.brush_size() * ERASER_WIDTH,
            color,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }],
    }
}

pub fn render_stamp(stamp: &StampPlacement) -> PaintCommand {
    PaintCommand::Layer {
        opacity: stamp.opacity,
        commands: vec![PaintCommand::Glyph {
            text: stamp.emoji.clone(),
            center: stamp.location,
            font_size: stamp.size * STAMP_TEXT_RATIO,
            color: Color32::WHITE,
        }],
    }
}

/// What a canvas frame is made of.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub canvas: Rect,
    pub background: Color32,
    pub strokes: &'a [Stroke],
    pub stamps: &'a [StampPlacement],
    pub live_stroke: Option<&'a Stroke>,
    pub stamps_on_top: bool,
}

/// Background, then committed elements, then the live stroke on top.
pub fn render_scene(scene: Scene<'_>) -> Vec<PaintCommand> {
    let mut commands = vec![PaintCommand::FillRect {
        rect: scene.canvas,
        color: scene.background,
    }];

    if scene.stamps_on_top {
        commands.extend(scene.strokes.iter().flat_map(render_stroke));
        commands.extend(scene.stamps.iter().map(render_stamp));
    } else {
        // merge by creation order
        let mut strokes = scene.strokes.iter().peekable();
        let mut stamps = scene.stamps.iter().peekable();
        loop {
            let stroke_first = match (strokes.peek(), stamps.peek()) {
                (Some(s), Some(p)) => s.sequence() <= p.sequence,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            if stroke_first {
                if let Some(s) = strokes.next() {
                    commands.extend(render_stroke(s));
                }
            } else if let Some(p) = stamps.next() {
                commands.push(render_stamp(p));
            }
        }
    }

    if let Some(live) = scene.live_stroke {
        commands.extend(render_stroke(live));
    }
    commands
}

/// A sample squiggle through `rect`, drawn with the same code as real strokes.
pub fn render_brush_preview(
    brush: &BrushDescriptor,
    color: Color32,
    size: f32,
    opacity: f32,
    rect: Rect,
) -> Vec<PaintCommand> {
    const SAMPLES: usize = 48;
    let amplitude = rect.height() * 0.25;
    let points: Vec<Pos2> = (0..SAMPLES)
        .map(|i| {
            let t = i as f32 / (SAMPLES - 1) as f32;
            let x = rect.left() + size * 0.5 + t * (rect.width() - size).max(0.0);
            let y = rect.center().y + (t * std::f32::consts::TAU).sin() * amplitude;
            pos2(x, y)
        })
        .collect();
    let commands = render_style(StrokeParams {
        points: &points,
        color,
        size,
        brush,
        seed: PREVIEW_SEED,
    });
    vec![PaintCommand::Layer { opacity, commands }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::MutableStroke;

    fn stroke(brush: BrushDescriptor, points: &[Pos2], opacity: f32, sequence: u64) -> Stroke {
        let mut s = MutableStroke::new(points[0], Color32::RED, 12.0, brush, opacity);
        for p in &points[1..] {
            s.add_point(*p);
        }
        s.seal(sequence)
    }

    #[test]
    fn test_eraser_is_opaque_and_unlayered() {
        let pts = [pos2(0.0, 0.0), pos2(10.0, 10.0)];
        for opacity in [0.0, 0.3, 1.0] {
            let cmds = render_stroke(&stroke(BrushDescriptor::eraser(), &pts, opacity, 0));
            assert_eq!(cmds.len(), 1);
            assert!(!matches!(cmds[0], PaintCommand::Layer { .. }));
            assert_eq!(cmds[0].color().map(|c| c.a()), Some(255));
        }
    }

    #[test]
    fn test_styles_are_layered_with_stroke_opacity() {
        let brush = BrushDescriptor::system_brushes()[0].clone();
        let cmds = render_stroke(&stroke(brush, &[pos2(0.0, 0.0), pos2(5.0, 5.0)], 0.4, 0));
        match cmds.as_slice() {
            [PaintCommand::Layer { opacity, commands }] => {
                assert_eq!(*opacity, 0.4);
                assert!(!commands.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_single_point_crayon_renders_nothing() {
        let brush = BrushDescriptor::system_brushes()[0].clone();
        assert!(render_stroke(&stroke(brush, &[pos2(1.0, 1.0)], 1.0, 0)).is_empty());
    }

    #[test]
    fn test_scene_interleaves_by_sequence() {
        let marker = BrushDescriptor::system_brushes()[1].clone();
        let strokes = vec![
            stroke(marker.clone(), &[pos2(0.0, 0.0), pos2(1.0, 0.0)], 1.0, 0),
            stroke(marker, &[pos2(0.0, 0.0), pos2(1.0, 0.0)], 1.0, 2),
        ];
        let stamps = vec![StampPlacement::new("⭐", pos2(5.0, 5.0), 20.0, 1.0, 1)];
        let scene = Scene {
            canvas: Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)),
            background: Color32::WHITE,
            strokes: &strokes,
            stamps: &stamps,
            live_stroke: None,
            stamps_on_top: false,
        };
        let is_glyph_layer = |c: &PaintCommand| {
            matches!(c, PaintCommand::Layer { commands, .. } if matches!(commands[0], PaintCommand::Glyph { .. }))
        };
        let cmds = render_scene(scene);
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], PaintCommand::FillRect { .. }));
        assert!(is_glyph_layer(&cmds[2]));

        let cmds = render_scene(Scene { stamps_on_top: true, ..scene });
        assert!(is_glyph_layer(&cmds[3]));
    }

    #[test]
    fn test_stamp_text_size() {
        let stamp = StampPlacement::new("🐸", pos2(0.0, 0.0), 50.0, 0.5, 0);
        let mut seen = Vec::new();
        render_stamp(&stamp).for_each_leaf(1.0, &mut |leaf, opacity| {
            seen.push((leaf.clone(), opacity));
        });
        match seen.as_slice() {
            [(PaintCommand::Glyph { font_size, .. }, opacity)] => {
                assert!((font_size - 36.0).abs() < 1e-4);
                assert_eq!(*opacity, 0.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_preview_uses_shared_renderer() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 60.0));
        for brush in BrushDescriptor::system_brushes() {
            let preview = render_brush_preview(&brush, Color32::RED, 12.0, 1.0, rect);
            match preview.as_slice() {
                [PaintCommand::Layer { commands, .. }] => assert!(!commands.is_empty(), "{}", brush.name),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
