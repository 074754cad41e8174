use geo::{EuclideanDistance, Line, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

pub fn cross_product(v1: Point, v2: Point) -> f64 {
    v1.x() * v2.y() - v1.y() * v2.x()
}

pub fn dot_product(v1: Point, v2: Point) -> f64 {
    v1.x() * v2.x() + v1.y() * v2.y()
}

/// Cross product of the edge `start -> stop` with the edge `stop -> reference`.
/// Positive when the path turns left at `stop`.
pub fn seq_cross_product(start: Point, stop: Point, reference: Point) -> f64 {
    let dx1 = stop.x() - start.x();
    let dy1 = stop.y() - start.y();
    let dx2 = reference.x() - stop.x();
    let dy2 = reference.y() - stop.y();
    cross_product((dx1, dy1).into(), (dx2, dy2).into())
}

pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = cross_product(b - a, c - a);

    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `p`, already known to be collinear with `a` and `b`, falls within
/// their bounding box.
fn within_span(p: Point, a: Point, b: Point) -> bool {
    p.x() >= a.x().min(b.x())
        && p.x() <= a.x().max(b.x())
        && p.y() >= a.y().min(b.y())
        && p.y() <= a.y().max(b.y())
}

/// Exact test for `p` lying on the closed segment `a..b`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    orientation(a, b, p) == Orientation::Collinear && within_span(p, a, b)
}

/// Whether the closed segments `p1..p2` and `q1..q2` share at least one point.
/// Touching endpoints and collinear overlap both count.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear
    {
        return true;
    }

    (o1 == Orientation::Collinear && within_span(q1, p1, p2))
        || (o2 == Orientation::Collinear && within_span(q2, p1, p2))
        || (o3 == Orientation::Collinear && within_span(p1, q1, q2))
        || (o4 == Orientation::Collinear && within_span(p2, q1, q2))
}

pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    p.euclidean_distance(&Line::new(a, b))
}

pub fn segment_segment_distance(p1: Point, p2: Point, q1: Point, q2: Point) -> f64 {
    if segments_intersect(p1, p2, q1, q2) {
        return 0.0;
    }

    point_segment_distance(p1, q1, q2)
        .min(point_segment_distance(p2, q1, q2))
        .min(point_segment_distance(q1, p1, p2))
        .min(point_segment_distance(q2, p1, p2))
}
