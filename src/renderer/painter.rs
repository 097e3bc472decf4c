use egui::epaint::Mesh;
use egui::{Align2, FontId, Painter, Pos2, Shape, Stroke as EguiStroke, Vec2};

use super::{LineCap, LineJoin, PaintCommand};
use crate::palette::with_opacity;

/// Executes draw calls on an egui painter, translating canvas coordinates by `offset`.
///
/// egui has no offscreen layers, so a layer's opacity is folded into the alpha
/// of each child.
pub fn paint_commands(painter: &Painter, commands: &[PaintCommand], offset: Vec2) {
    for command in commands {
        command.for_each_leaf(1.0, &mut |leaf, opacity| paint_leaf(painter, leaf, opacity, offset));
    }
}

fn paint_leaf(painter: &Painter, leaf: &PaintCommand, opacity: f32, offset: Vec2) {
    match leaf {
        PaintCommand::FillRect { rect, color } => {
            painter.rect_filled(rect.translate(offset), 0.0, with_opacity(*color, opacity));
        }
        PaintCommand::Polyline {
            points,
            width,
            color,
            cap,
            join,
        } => {
            let color = with_opacity(*color, opacity);
            let points: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
            let radius = width / 2.0;
            if *join == LineJoin::Round && points.len() > 2 {
                for p in &points[1..points.len() - 1] {
                    painter.circle_filled(*p, radius, color);
                }
            }
            if *cap == LineCap::Round {
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    painter.circle_filled(*first, radius, color);
                    painter.circle_filled(*last, radius, color);
                }
            }
            painter.add(Shape::line(points, EguiStroke::new(*width, color)));
        }
        PaintCommand::Circle {
            center,
            radius,
            color,
        } => {
            painter.circle_filled(*center + offset, *radius, with_opacity(*color, opacity));
        }
        PaintCommand::Polygon { points, color } => {
            if points.len() < 3 {
                return;
            }
            painter.add(fan_mesh(points, with_opacity(*color, opacity), offset));
        }
        PaintCommand::Glyph {
            text,
            center,
            font_size,
            color,
        } => {
            painter.text(
                *center + offset,
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(*font_size),
                with_opacity(*color, opacity),
            );
        }
        PaintCommand::Layer { .. } => {}
    }
}

/// Triangle fan around the centroid. Every pattern shape is star-convex
/// about its centre, which is all a fan needs.
fn fan_mesh(points: &[Pos2], color: egui::Color32, offset: Vec2) -> Shape {
    let n = points.len() as f32;
    let centroid = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2()) / n;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(centroid.to_pos2() + offset, color);
    for p in points {
        mesh.colored_vertex(*p + offset, color);
    }
    let count = points.len() as u32;
    for i in 0..count {
        let a = 1 + i;
        let b = 1 + (i + 1) % count;
        mesh.add_triangle(0, a, b);
    }
    Shape::Mesh(mesh.into())
}
