use egui::Pos2;

use crate::geometry::{cubic_point, polyline_length, quad_point};

const MIN_QUAD_STEPS: usize = 8;
const MIN_CUBIC_STEPS: usize = 12;
/// Target length of one flattened piece.
const STEP_LENGTH: f32 = 4.0;
const JOIN_EPSILON: f32 = 1e-3;

/// One segment of a glyph outline, already in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineSegment {
    Line(Pos2, Pos2),
    Quad(Pos2, Pos2, Pos2),
    Cubic(Pos2, Pos2, Pos2, Pos2),
}

impl OutlineSegment {
    pub fn start(&self) -> Pos2 {
        match *self {
            OutlineSegment::Line(p0, _)
            | OutlineSegment::Quad(p0, _, _)
            | OutlineSegment::Cubic(p0, _, _, _) => p0,
        }
    }

    pub fn end(&self) -> Pos2 {
        match *self {
            OutlineSegment::Line(_, p1) => p1,
            OutlineSegment::Quad(_, _, p2) => p2,
            OutlineSegment::Cubic(_, _, _, p3) => p3,
        }
    }

    /// Appends the flattened segment to `out`, excluding its start point.
    fn flatten_into(&self, out: &mut Vec<Pos2>) {
        match *self {
            OutlineSegment::Line(_, p1) => out.push(p1),
            OutlineSegment::Quad(p0, p1, p2) => {
                let steps = steps_for(polyline_length(&[p0, p1, p2]), MIN_QUAD_STEPS);
                for i in 1..=steps {
                    out.push(quad_point(p0, p1, p2, i as f32 / steps as f32));
                }
            }
            OutlineSegment::Cubic(p0, p1, p2, p3) => {
                let steps = steps_for(polyline_length(&[p0, p1, p2, p3]), MIN_CUBIC_STEPS);
                for i in 1..=steps {
                    out.push(cubic_point(p0, p1, p2, p3, i as f32 / steps as f32));
                }
            }
        }
    }
}

/// The control polygon bounds the curve length from above.
fn steps_for(estimated_length: f32, minimum: usize) -> usize {
    let by_length = (estimated_length / STEP_LENGTH).ceil();
    if by_length.is_finite() {
        minimum.max(by_length as usize)
    } else {
        minimum
    }
}

/// Splits a segment list into closed rings of points. A new ring starts
/// whenever a segment does not begin where the previous one ended.
pub fn flatten(segments: &[OutlineSegment]) -> Vec<Vec<Pos2>> {
    let mut rings: Vec<Vec<Pos2>> = Vec::new();
    let mut current: Vec<Pos2> = Vec::new();

    for segment in segments {
        let joined = current
            .last()
            .is_some_and(|last| last.distance(segment.start()) <= JOIN_EPSILON);
        if !joined {
            push_ring(&mut rings, std::mem::take(&mut current));
            current.push(segment.start());
        }
        segment.flatten_into(&mut current);
    }
    push_ring(&mut rings, current);
    rings
}

/// Closes the ring if needed and keeps it when it has some extent.
fn push_ring(rings: &mut Vec<Vec<Pos2>>, mut ring: Vec<Pos2>) {
    if ring.len() < 2 {
        return;
    }
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first.distance(last) > JOIN_EPSILON {
            ring.push(first);
        }
    }
    rings.push(ring);
}

/// Points every `spacing` units of arc length along each ring, starting at
/// the ring's first point.
pub fn sample_rings(rings: &[Vec<Pos2>], spacing: f32) -> Vec<Pos2> {
    let mut samples = Vec::new();
    if spacing <= 0.0 || !spacing.is_finite() {
        return samples;
    }
    for ring in rings {
        let total = polyline_length(ring);
        let mut target = 0.0;
        let mut walked = 0.0;
        for pair in ring.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let len = a.distance(b);
            if len <= f32::EPSILON {
                continue;
            }
            while target <= walked + len && target < total - JOIN_EPSILON {
                let t = (target - walked) / len;
                samples.push(a + (b - a) * t);
                target += spacing;
            }
            walked += len;
        }
    }
    samples
}
