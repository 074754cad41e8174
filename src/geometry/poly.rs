use std::{
    f64::consts::{PI, TAU},
    hash::{Hash, Hasher},
};

use geo::{Coord, Point};
use rstar::AABB;

use crate::{
    geometry::{
        error::{GeometryError, InvalidArgument, UnsupportedOperation},
        primitive::{LineShape, RectShape},
        shape::{AccessShape, Precision, ShapeKind},
    },
    math,
};

/// A convex polygon stored as its canonical ring: consecutive duplicates
/// collapsed and the start vertex not repeated at the end.
///
/// Only obtainable through validating constructors, so every instance has at
/// least three distinct, finite, non-collinear vertices forming a convex ring.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "use-serde",
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct PolygonShape {
    vertices: Vec<Coord>,
    mbr: RectShape,
}

impl PolygonShape {
    /// Builds a polygon from alternating `x, y` values.
    pub fn new(coords: &[f64]) -> Result<Self, GeometryError> {
        let result = Self::build(coords);

        if let Err(err) = &result {
            log::debug!("rejected polygon from {} values: {}", coords.len(), err);
        }

        result
    }

    fn build(coords: &[f64]) -> Result<Self, GeometryError> {
        if let Some(index) = coords.iter().position(|v| !v.is_finite()) {
            return Err(InvalidArgument::NonFiniteCoordinate { index }.into());
        }

        if coords.len() % 2 != 0 {
            return Err(InvalidArgument::OddCoordinateCount {
                count: coords.len(),
            }
            .into());
        }

        let vertices = canonical_ring(coords);

        if vertices.len() < 3 {
            return Err(InvalidArgument::NotEnoughPoints {
                distinct: vertices.len(),
            }
            .into());
        }

        check_convex(&vertices)?;

        let mbr = bounding_rect(&vertices);
        Ok(Self { vertices, mbr })
    }

    pub fn vertices(&self) -> &[Coord] {
        &self.vertices
    }

    /// Edges of the ring, including the closing one from the last vertex back
    /// to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| {
            (
                Point::from(self.vertices[i]),
                Point::from(self.vertices[(i + 1) % n]),
            )
        })
    }

    /// Canonical ring flattened back to alternating `x, y` values.
    pub fn to_coords(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|c| [c.x, c.y]).collect()
    }

    /// Whether `p` is inside the polygon or on its boundary.
    pub fn contains_point(&self, p: Point) -> bool {
        let scale = self.shared_scale([p]);
        self.contains_scaled(p * scale, scale)
    }

    /// Whether the finite segment `line` touches the polygon.
    pub fn intersects_line(&self, line: &LineShape) -> bool {
        let scale = self.shared_scale([line.from, line.to]);
        let (from, to) = (line.from * scale, line.to * scale);

        self.contains_scaled(from, scale)
            || self.contains_scaled(to, scale)
            || self
                .scaled_edges(scale)
                .any(|(a, b)| math::segments_intersect(from, to, a, b))
    }

    /// Scale shared by the ring and the given points, see [`overflow_scale`].
    fn shared_scale<const N: usize>(&self, points: [Point; N]) -> f64 {
        let max_abs = points
            .iter()
            .flat_map(|p| [p.x().abs(), p.y().abs()])
            .chain([
                self.mbr.x1().abs(),
                self.mbr.y1().abs(),
                self.mbr.x2().abs(),
                self.mbr.y2().abs(),
            ])
            .fold(0.0, f64::max);

        overflow_scale(max_abs)
    }

    fn scaled_edges(&self, scale: f64) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.edges().map(move |(from, to)| (from * scale, to * scale))
    }

    /// `p` is already multiplied by `scale`.
    fn contains_scaled(&self, p: Point, scale: f64) -> bool {
        if self
            .scaled_edges(scale)
            .any(|(from, to)| math::point_on_segment(p, from, to))
        {
            return true;
        }

        // Even-odd ray cast towards +x. Boundary hits were handled above.
        let mut inside = false;

        for (from, to) in self.scaled_edges(scale) {
            if (from.y() > p.y()) != (to.y() > p.y()) {
                let x_cross =
                    from.x() + (p.y() - from.y()) * (to.x() - from.x()) / (to.y() - from.y());

                if p.x() < x_cross {
                    inside = !inside;
                }
            }
        }

        inside
    }
}

impl AccessShape for PolygonShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn mbr(&self) -> RectShape {
        self.mbr
    }

    fn precision(&self) -> Precision {
        Precision::Double
    }
}

impl PartialEq for PolygonShape {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

// Coordinates are finite, so equality is total.
impl Eq for PolygonShape {}

impl Hash for PolygonShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.len().hash(state);

        for vertex in &self.vertices {
            hash_f64(vertex.x, state);
            hash_f64(vertex.y, state);
        }
    }
}

/// `0.0` and `-0.0` compare equal and must hash alike.
fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

impl TryFrom<&[f64]> for PolygonShape {
    type Error = GeometryError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        Self::new(coords)
    }
}

impl TryFrom<Vec<f64>> for PolygonShape {
    type Error = GeometryError;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&coords)
    }
}

impl From<PolygonShape> for Vec<f64> {
    fn from(polygon: PolygonShape) -> Self {
        polygon.to_coords()
    }
}

fn canonical_ring(coords: &[f64]) -> Vec<Coord> {
    let mut vertices: Vec<Coord> = coords
        .chunks_exact(2)
        .map(|pair| Coord {
            x: pair[0],
            y: pair[1],
        })
        .collect();
    let raw_len = vertices.len();

    vertices.dedup();

    // Closing the ring may expose more duplicates of the start vertex.
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    if vertices.len() != raw_len {
        log::trace!(
            "normalized polygon ring from {} to {} vertices",
            raw_len,
            vertices.len()
        );
    }

    vertices
}

fn check_convex(vertices: &[Coord]) -> Result<(), GeometryError> {
    let n = vertices.len();
    let mut has_left = false;
    let mut has_right = false;
    let mut has_reversal = false;
    let mut winding = 0.0_f64;

    let max_abs = vertices
        .iter()
        .flat_map(|v| [v.x.abs(), v.y.abs()])
        .fold(0.0, f64::max);
    let scale = overflow_scale(max_abs);

    for i in 0..n {
        let a = Point::from(vertices[i]) * scale;
        let b = Point::from(vertices[(i + 1) % n]) * scale;
        let c = Point::from(vertices[(i + 2) % n]) * scale;

        let incoming = b - a;
        let outgoing = c - b;
        let cross = math::seq_cross_product(a, b, c);
        let dot = math::dot_product(incoming, outgoing);

        if cross > 0.0 {
            has_left = true;
        } else if cross < 0.0 {
            has_right = true;
        } else if dot < 0.0 {
            has_reversal = true;
        }

        winding += cross.atan2(dot);
    }

    if !has_left && !has_right {
        return Err(InvalidArgument::ZeroArea.into());
    }

    // A convex ring turns exactly once; anything more is a self-intersecting star.
    if (has_left && has_right) || has_reversal || winding.abs() > TAU + PI {
        return Err(UnsupportedOperation::NonConvexPolygon.into());
    }

    Ok(())
}

/// Coordinates above this may overflow when differences are multiplied.
const OVERFLOW_THRESHOLD: f64 = 1e150;

/// Power of two that brings `max_abs` down to about 1 when it is large enough
/// for cross products to overflow. Multiplying by it is exact, so turn signs
/// and ray crossings don't change.
fn overflow_scale(max_abs: f64) -> f64 {
    if max_abs <= OVERFLOW_THRESHOLD {
        return 1.0;
    }

    let exponent = (max_abs.log2().ceil() as i32).min(1022);
    2.0_f64.powi(-exponent)
}

fn bounding_rect(vertices: &[Coord]) -> RectShape {
    let points: Vec<[f64; 2]> = vertices.iter().map(|v| [v.x, v.y]).collect();
    let aabb = AABB::<[f64; 2]>::from_points(points.iter());

    RectShape::from_corners(
        Point::new(aabb.lower()[0], aabb.lower()[1]),
        Point::new(aabb.upper()[0], aabb.upper()[1]),
        Precision::Double,
    )
}

#[cfg(test)]
mod tests {
    use geo::point;

    use super::*;

    const SQUARE: [f64; 8] = [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0];

    #[test]
    fn test_closing_vertex_is_dropped() {
        let closed =
            PolygonShape::new(&[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0]).unwrap();
        let open = PolygonShape::new(&SQUARE).unwrap();

        assert_eq!(closed.vertices().len(), 4);
        assert_eq!(closed, open);
    }

    #[test]
    fn test_duplicates_around_the_seam_collapse() {
        let polygon =
            PolygonShape::new(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
                .unwrap();

        assert_eq!(polygon.to_coords(), vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_collinear_ring_is_zero_area() {
        let err = PolygonShape::new(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidArgument(InvalidArgument::ZeroArea));
    }

    #[test]
    fn test_collinear_edges_are_convex() {
        // Square with an extra vertex in the middle of one side.
        let polygon =
            PolygonShape::new(&[0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 2.0, 2.0, 2.0, 0.0]).unwrap();
        assert_eq!(polygon.vertices().len(), 5);
    }

    #[test]
    fn test_spike_is_not_convex() {
        let err = PolygonShape::new(&[0.0, 0.0, 2.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_reversal_with_uniform_turns_is_not_convex() {
        // Every turn is to the left and the ring winds once, but the first
        // edge folds straight back on itself at (-1, 0).
        let err = PolygonShape::new(&[
            0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 0.0, -1.0,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedOperation(UnsupportedOperation::NonConvexPolygon)
        );
    }

    #[test]
    fn test_huge_coordinates() {
        let polygon = PolygonShape::new(&[0.0, 0.0, 1e200, 1e200, 1e200, 3e200]).unwrap();

        assert_eq!(polygon.vertices().len(), 3);
        assert!(polygon.contains_point(point! {x: 0.9e200, y: 1.5e200}));
        assert!(polygon.contains_point(point! {x: 1e200, y: 2e200}));
        assert!(!polygon.contains_point(point! {x: 0.5e200, y: 2e200}));
        assert!(polygon.intersects_line(&LineShape::new(-1e300, 2e200, 1e300, 2e200)));
        assert!(!polygon.intersects_line(&LineShape::new(-1e300, -1e300, 1e300, -1e300)));

        let mbr = polygon.mbr();
        assert_eq!((mbr.x1(), mbr.y1(), mbr.x2(), mbr.y2()), (0.0, 0.0, 1e200, 3e200));
    }

    #[test]
    fn test_pentagram_is_not_convex() {
        let mut coords = vec![];

        for k in 0..5 {
            let angle = (k * 2) as f64 * TAU / 5.0;
            coords.push(angle.cos());
            coords.push(angle.sin());
        }

        let err = PolygonShape::new(&coords).unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedOperation(UnsupportedOperation::NonConvexPolygon)
        );
    }

    #[test]
    fn test_non_finite_coordinate() {
        let err = PolygonShape::new(&[0.0, 0.0, f64::NAN, 1.0, 1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidArgument(InvalidArgument::NonFiniteCoordinate { index: 2 })
        );
    }

    #[test]
    fn test_contains_point_clockwise_and_counterclockwise() {
        let cw = PolygonShape::new(&SQUARE).unwrap();
        let ccw = PolygonShape::new(&[-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0]).unwrap();

        for polygon in [cw, ccw] {
            assert!(polygon.contains_point(point! {x: 0.0, y: 0.0}));
            assert!(polygon.contains_point(point! {x: -1.0, y: 0.0}));
            assert!(polygon.contains_point(point! {x: 1.0, y: 1.0}));
            assert!(!polygon.contains_point(point! {x: 1.0, y: 1.5}));
            assert!(!polygon.contains_point(point! {x: -3.0, y: 0.0}));
        }
    }

    #[test]
    fn test_segment_along_edge_intersects() {
        let polygon = PolygonShape::new(&SQUARE).unwrap();
        assert!(polygon.intersects_line(&LineShape::new(-3.0, 1.0, 3.0, 1.0)));
    }

    #[test]
    fn test_negative_zero_hashes_like_zero() {
        use std::collections::hash_map::DefaultHasher;

        let a = PolygonShape::new(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        let b = PolygonShape::new(&[-0.0, 0.0, 1.0, -0.0, 0.0, 1.0]).unwrap();

        let hash = |p: &PolygonShape| {
            let mut hasher = DefaultHasher::new();
            p.hash(&mut hasher);
            hasher.finish()
        };

        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }
}
