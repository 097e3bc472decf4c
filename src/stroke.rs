use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::brush::BrushDescriptor;

// Immutable stroke, sealed when the pointer is released
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: Uuid,
    sequence: u64,
    points: Vec<Pos2>,
    color: Color32,
    brush_size: f32,
    brush: BrushDescriptor,
    opacity: f32,
}

// Stroke still being drawn; only its point list can grow
#[derive(Debug, Clone, PartialEq)]
pub struct MutableStroke {
    id: Uuid,
    points: Vec<Pos2>,
    color: Color32,
    brush_size: f32,
    brush: BrushDescriptor,
    opacity: f32,
}

impl Stroke {
    /// Reassembles a sealed stroke, e.g. from a persisted snapshot.
    pub fn from_parts(
        id: Uuid,
        sequence: u64,
        points: Vec<Pos2>,
        color: Color32,
        brush_size: f32,
        brush: BrushDescriptor,
        opacity: f32,
    ) -> Self {
        Self {
            id,
            sequence,
            points,
            color,
            brush_size,
            brush,
            opacity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation order relative to other strokes and stamps.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn brush(&self) -> &BrushDescriptor {
        &self.brush
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_eraser(&self) -> bool {
        self.brush.is_eraser()
    }

    /// Seed for the procedural texture of this stroke.
    pub fn seed(&self) -> u64 {
        seed_for(self.id)
    }
}

impl MutableStroke {
    // Start a new stroke at the first pointer position
    pub fn new(
        start: Pos2,
        color: Color32,
        brush_size: f32,
        brush: BrushDescriptor,
        opacity: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            color,
            brush_size,
            brush,
            opacity,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Consumes the in-progress stroke and seals it.
    pub fn seal(self, sequence: u64) -> Stroke {
        Stroke {
            id: self.id,
            sequence,
            points: self.points,
            color: self.color,
            brush_size: self.brush_size,
            brush: self.brush,
            opacity: self.opacity,
        }
    }

    /// A sealed copy for previewing while the stroke is still growing.
    pub fn preview(&self) -> Stroke {
        self.clone().seal(u64::MAX)
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn brush(&self) -> &BrushDescriptor {
        &self.brush
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn is_eraser(&self) -> bool {
        self.brush.is_eraser()
    }
}

fn seed_for(id: Uuid) -> u64 {
    let (hi, lo) = id.as_u64_pair();
    hi ^ lo.rotate_left(32)
}

/// An emoji dropped onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct StampPlacement {
    pub id: Uuid,
    pub sequence: u64,
    pub emoji: String,
    pub location: Pos2,
    pub size: f32,
    pub opacity: f32,
}

impl StampPlacement {
    pub fn new(emoji: impl Into<String>, location: Pos2, size: f32, opacity: f32, sequence: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            emoji: emoji.into(),
            location,
            size,
            opacity,
        }
    }

    /// True if `point` falls inside the stamp's box grown by `radius`.
    pub fn hit_test(&self, point: Pos2, radius: f32) -> bool {
        let reach = self.size / 2.0 + radius;
        (point.x - self.location.x).abs() <= reach && (point.y - self.location.y).abs() <= reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_mutable_stroke_seals_points() {
        let brush = BrushDescriptor::system_brushes()[0].clone();
        let mut stroke = MutableStroke::new(pos2(0.0, 0.0), Color32::RED, 24.0, brush, 0.8);
        stroke.add_point(pos2(10.0, 0.0));
        let id = stroke.id;
        let sealed = stroke.seal(4);
        assert_eq!(sealed.points().len(), 2);
        assert_eq!(sealed.id(), id);
        assert_eq!(sealed.sequence(), 4);
        assert_eq!(sealed.opacity(), 0.8);
    }

    #[test]
    fn test_preview_keeps_seed() {
        let brush = BrushDescriptor::system_brushes()[0].clone();
        let stroke = MutableStroke::new(pos2(1.0, 1.0), Color32::BLUE, 12.0, brush, 1.0);
        let a = stroke.preview();
        let b = stroke.clone().seal(0);
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn test_stamp_hit_test() {
        let stamp = StampPlacement::new("⭐", pos2(50.0, 50.0), 20.0, 1.0, 0);
        assert!(stamp.hit_test(pos2(58.0, 42.0), 0.0));
        assert!(!stamp.hit_test(pos2(65.0, 50.0), 0.0));
        assert!(stamp.hit_test(pos2(65.0, 50.0), 6.0));
    }
}
