//! Pairwise predicates over [`Geometry`].
//!
//! Both functions match on the concrete pair of shape kinds, so the set of
//! supported combinations is listed here in one place. Pairs that aren't
//! implemented fail with [`UnsupportedOperation`] instead of approximating.

use geo::EuclideanDistance;

use crate::geometry::{
    error::{GeometryError, UnsupportedOperation},
    shape::{AccessShape, Geometry},
};

/// Whether `a` and `b` share at least one point. Boundaries are inclusive
/// and the result doesn't depend on operand order.
///
/// Polygons only support points and lines as the other operand.
pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool, GeometryError> {
    use Geometry::*;

    let hit = match (a, b) {
        (Point(p), Point(q)) => p.pos() == q.pos(),
        (Point(p), Line(l)) | (Line(l), Point(p)) => l.contains_point(p.pos()),
        (Point(p), Rectangle(r)) | (Rectangle(r), Point(p)) => r.contains_point(p.pos()),
        (Point(p), Circle(c)) | (Circle(c), Point(p)) => c.contains_point(p.pos()),
        (Point(p), Polygon(poly)) | (Polygon(poly), Point(p)) => poly.contains_point(p.pos()),

        (Line(l), Line(m)) => l.intersects_line(m),
        (Line(l), Rectangle(r)) | (Rectangle(r), Line(l)) => r.intersects_line(l),
        (Line(l), Circle(c)) | (Circle(c), Line(l)) => c.intersects_line(l),
        (Line(l), Polygon(poly)) | (Polygon(poly), Line(l)) => poly.intersects_line(l),

        (Rectangle(r), Rectangle(s)) => r.intersects_rect(s),
        (Rectangle(r), Circle(c)) | (Circle(c), Rectangle(r)) => c.intersects_rect(r),

        (Circle(c), Circle(d)) => c.intersects_circle(d),

        (Rectangle(_), Polygon(_))
        | (Polygon(_), Rectangle(_))
        | (Circle(_), Polygon(_))
        | (Polygon(_), Circle(_))
        | (Polygon(_), Polygon(_)) => {
            return Err(UnsupportedOperation::Intersects(a.kind(), b.kind()).into())
        }
    };

    Ok(hit)
}

/// Euclidean distance between `a` and `b`; zero when they intersect.
///
/// Not defined for polygons.
pub fn distance(a: &Geometry, b: &Geometry) -> Result<f64, GeometryError> {
    use Geometry::*;

    let d = match (a, b) {
        (Point(p), Point(q)) => p.pos().euclidean_distance(&q.pos()),
        (Point(p), Line(l)) | (Line(l), Point(p)) => l.distance_to_point(p.pos()),
        (Point(p), Rectangle(r)) | (Rectangle(r), Point(p)) => r.distance_to_point(p.pos()),
        (Point(p), Circle(c)) | (Circle(c), Point(p)) => c.distance_to_point(p.pos()),

        (Line(l), Line(m)) => l.distance_to_line(m),
        (Line(l), Rectangle(r)) | (Rectangle(r), Line(l)) => r.distance_to_line(l),
        (Line(l), Circle(c)) | (Circle(c), Line(l)) => c.distance_to_line(l),

        (Rectangle(r), Rectangle(s)) => r.distance_to_rect(s),
        (Rectangle(r), Circle(c)) | (Circle(c), Rectangle(r)) => c.distance_to_rect(r),

        (Circle(c), Circle(d)) => c.distance_to_circle(d),

        (Polygon(_), _) | (_, Polygon(_)) => {
            return Err(UnsupportedOperation::Distance(a.kind(), b.kind()).into())
        }
    };

    Ok(d)
}
