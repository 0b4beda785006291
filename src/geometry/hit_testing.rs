use egui::{Pos2, Rect};

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

/// Distance from a polyline to a point, or infinity for an empty polyline
pub fn distance_to_polyline(point: Pos2, points: &[Pos2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [single] => point.distance(*single),
        _ => points
            .windows(2)
            .map(|w| distance_to_line_segment(point, w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Whether segments `a0-a1` and `b0-b1` cross or touch
pub fn segments_intersect(a0: Pos2, a1: Pos2, b0: Pos2, b1: Pos2) -> bool {
    let d1 = cross(b0, b1, a0);
    let d2 = cross(b0, b1, a1);
    let d3 = cross(a0, a1, b0);
    let d4 = cross(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Collinear or touching cases
    let on_segment = |p: Pos2, q: Pos2, r: Pos2| {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

/// Shortest distance between a segment and an axis-aligned rectangle (0 when they overlap)
pub fn segment_rect_distance(start: Pos2, end: Pos2, rect: Rect) -> f32 {
    if rect.contains(start) || rect.contains(end) {
        return 0.0;
    }

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for i in 0..4 {
        if segments_intersect(start, end, corners[i], corners[(i + 1) % 4]) {
            return 0.0;
        }
    }

    let from_corners = corners
        .iter()
        .map(|corner| distance_to_line_segment(*corner, start, end))
        .fold(f32::INFINITY, f32::min);
    let from_ends = rect.distance_to_pos(start).min(rect.distance_to_pos(end));
    from_corners.min(from_ends)
}

/// Whether a polyline swept with the given radius touches the rectangle
pub fn polyline_touches_rect(points: &[Pos2], radius: f32, rect: Rect) -> bool {
    if !rect.is_finite() || rect.width() < 0.0 || rect.height() < 0.0 {
        return false;
    }
    match points {
        [] => false,
        [single] => rect.distance_to_pos(*single) <= radius,
        _ => points
            .windows(2)
            .any(|w| segment_rect_distance(w[0], w[1], rect) <= radius),
    }
}
