use egui::{Pos2, Rect, pos2};

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds<'a>(points: impl IntoIterator<Item = &'a Pos2>, padding: f32) -> Rect {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    let mut any = false;

    for point in points {
        any = true;
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    if !any {
        return Rect::NOTHING;
    }

    Rect::from_min_max(
        pos2(min_x - padding, min_y - padding),
        pos2(max_x + padding, max_y + padding),
    )
}

pub fn polyline_length(points: &[Pos2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

pub fn quad_point(p0: Pos2, p1: Pos2, p2: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    pos2(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

pub fn cubic_point(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    pos2(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Crossing count of a horizontal ray from `point` against one closed ring.
fn ray_crossings(point: Pos2, ring: &[Pos2]) -> usize {
    let n = ring.len();
    if n < 3 {
        return 0;
    }
    let mut crossings = 0;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                crossings += 1;
            }
        }
        j = i;
    }
    crossings
}

/// Even-odd containment across all rings, so nested rings act as holes.
pub fn contains_even_odd(point: Pos2, rings: &[Vec<Pos2>]) -> bool {
    let total: usize = rings.iter().map(|ring| ray_crossings(point, ring)).sum();
    total % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Vec<Pos2> {
        vec![pos2(min, min), pos2(max, min), pos2(max, max), pos2(min, max)]
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
        let d = distance_to_line_segment(pos2(-4.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
        let d = distance_to_line_segment(pos2(1.0, 1.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((d - 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_bounds() {
        let pts = [pos2(1.0, 5.0), pos2(-2.0, 3.0)];
        let rect = calculate_bounds(&pts, 1.0);
        assert_eq!(rect.min, pos2(-3.0, 2.0));
        assert_eq!(rect.max, pos2(2.0, 6.0));
        assert_eq!(calculate_bounds(&[] as &[Pos2], 0.0), Rect::NOTHING);
    }

    #[test]
    fn test_even_odd_hole() {
        let rings = vec![square(0.0, 100.0), square(30.0, 70.0)];
        assert!(contains_even_odd(pos2(10.0, 50.0), &rings));
        assert!(!contains_even_odd(pos2(50.0, 50.0), &rings));
        assert!(!contains_even_odd(pos2(150.0, 50.0), &rings));
    }

    #[test]
    fn test_curve_endpoints() {
        let (a, b, c, d) = (pos2(0.0, 0.0), pos2(1.0, 2.0), pos2(3.0, 2.0), pos2(4.0, 0.0));
        assert_eq!(quad_point(a, b, c, 0.0), a);
        assert_eq!(quad_point(a, b, c, 1.0), c);
        assert_eq!(cubic_point(a, b, c, d, 1.0), d);
    }
}
