use std::f32::consts::{PI, TAU};

use egui::{Color32, Pos2, pos2};

use super::PaintCommand;
use crate::brush::PatternShape;
use crate::geometry::cubic_point;

const CURVE_STEPS: usize = 12;
const ARC_STEPS: usize = 16;

/// Fill primitives for one pattern shape centred at `center`, `size` across.
pub fn shape_commands(shape: PatternShape, center: Pos2, size: f32, color: Color32) -> Vec<PaintCommand> {
    let r = size / 2.0;
    match shape {
        PatternShape::Dot | PatternShape::Circle => vec![PaintCommand::Circle {
            center,
            radius: r,
            color,
        }],
        PatternShape::Flower => flower(center, size, color),
        _ => vec![PaintCommand::Polygon {
            points: outline(shape, center, size),
            color,
        }],
    }
}

/// Polygon outline for the polygonal shapes. Round shapes return an empty list.
pub fn outline(shape: PatternShape, center: Pos2, size: f32) -> Vec<Pos2> {
    let r = size / 2.0;
    match shape {
        PatternShape::Star => (0..10)
            .map(|i| {
                let angle = i as f32 / 10.0 * TAU - PI / 2.0;
                let rr = if i % 2 == 0 { r } else { r * 0.42 };
                pos2(center.x + rr * angle.cos(), center.y + rr * angle.sin())
            })
            .collect(),
        PatternShape::Square => vec![
            pos2(center.x - r, center.y - r),
            pos2(center.x + r, center.y - r),
            pos2(center.x + r, center.y + r),
            pos2(center.x - r, center.y + r),
        ],
        PatternShape::Diamond => vec![
            pos2(center.x, center.y - r),
            pos2(center.x + r, center.y),
            pos2(center.x, center.y + r),
            pos2(center.x - r, center.y),
        ],
        PatternShape::Triangle => vec![
            pos2(center.x, center.y - r),
            pos2(center.x + r, center.y + r),
            pos2(center.x - r, center.y + r),
        ],
        PatternShape::Heart => heart(center, size),
        PatternShape::Dot | PatternShape::Circle | PatternShape::Flower => Vec::new(),
    }
}

fn heart(center: Pos2, size: f32) -> Vec<Pos2> {
    let (w, h) = (size, size);
    let x = center.x - w / 2.0;
    let y = center.y - h / 2.0;
    let tip = pos2(x + w * 0.5, y + h * 0.85);
    let left = pos2(x, y + h * 0.35);

    let mut points = Vec::with_capacity(CURVE_STEPS * 2 + ARC_STEPS * 2);
    for i in 0..CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        points.push(cubic_point(
            tip,
            pos2(x + w * 0.1, y + h * 0.70),
            pos2(x, y + h * 0.50),
            left,
            t,
        ));
    }
    // two lobes, each a half circle over the top
    for lobe_x in [0.25, 0.75] {
        let c = pos2(x + w * lobe_x, y + h * 0.25);
        let radius = w * 0.25;
        for i in 0..ARC_STEPS {
            let angle = PI + PI * i as f32 / ARC_STEPS as f32;
            points.push(pos2(c.x + radius * angle.cos(), c.y + radius * angle.sin()));
        }
    }
    let right = pos2(x + w, y + h * 0.25);
    for i in 0..CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        points.push(cubic_point(
            right,
            pos2(x + w, y + h * 0.50),
            pos2(x + w * 0.9, y + h * 0.70),
            tip,
            t,
        ));
    }
    points
}

fn flower(center: Pos2, size: f32, color: Color32) -> Vec<PaintCommand> {
    let petal_r = size * 0.28;
    let orbit = size * 0.24;
    let mut commands: Vec<PaintCommand> = (0..6)
        .map(|i| {
            let angle = i as f32 / 6.0 * TAU;
            PaintCommand::Circle {
                center: pos2(center.x + angle.cos() * orbit, center.y + angle.sin() * orbit),
                radius: petal_r,
                color,
            }
        })
        .collect();
    commands.push(PaintCommand::Circle {
        center,
        radius: petal_r * 0.6,
        color,
    });
    commands
}
