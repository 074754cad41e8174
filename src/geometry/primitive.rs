use geo::{point, EuclideanDistance, Point};
use rstar::AABB;

use crate::{
    geometry::{
        error::{GeometryError, InvalidArgument},
        shape::{AccessShape, Precision, ShapeKind},
    },
    math,
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointShape {
    pos: Point,
    precision: Precision,
}

impl PointShape {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: point! {x: x, y: y},
            precision: Precision::Double,
        }
    }

    pub fn new_single(x: f32, y: f32) -> Self {
        Self {
            pos: point! {x: f64::from(x), y: f64::from(y)},
            precision: Precision::Single,
        }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn x(&self) -> f64 {
        self.pos.x()
    }

    pub fn y(&self) -> f64 {
        self.pos.y()
    }
}

impl AccessShape for PointShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn mbr(&self) -> RectShape {
        RectShape::from_corners(self.pos, self.pos, self.precision)
    }

    fn precision(&self) -> Precision {
        self.precision
    }
}

/// A finite segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineShape {
    pub from: Point,
    pub to: Point,
}

impl LineShape {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: point! {x: x1, y: y1},
            to: point! {x: x2, y: y2},
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        math::point_on_segment(p, self.from, self.to)
    }

    pub fn intersects_line(&self, other: &LineShape) -> bool {
        math::segments_intersect(self.from, self.to, other.from, other.to)
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        math::point_segment_distance(p, self.from, self.to)
    }

    pub fn distance_to_line(&self, other: &LineShape) -> f64 {
        math::segment_segment_distance(self.from, self.to, other.from, other.to)
    }
}

impl AccessShape for LineShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn mbr(&self) -> RectShape {
        RectShape::from_corners(
            point! {x: self.from.x().min(self.to.x()), y: self.from.y().min(self.to.y())},
            point! {x: self.from.x().max(self.to.x()), y: self.from.y().max(self.to.y())},
            Precision::Double,
        )
    }
}

/// Axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "use-serde", serde(try_from = "RawRect"))]
pub struct RectShape {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    precision: Precision,
}

impl RectShape {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, GeometryError> {
        Self::validated(x1, y1, x2, y2, Precision::Double)
    }

    pub fn new_single(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, GeometryError> {
        Self::validated(
            f64::from(x1),
            f64::from(y1),
            f64::from(x2),
            f64::from(y2),
            Precision::Single,
        )
    }

    fn validated(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        precision: Precision,
    ) -> Result<Self, GeometryError> {
        if let Some(index) = [x1, y1, x2, y2].iter().position(|v| !v.is_finite()) {
            return Err(InvalidArgument::NonFiniteCoordinate { index }.into());
        }

        if x2 < x1 || y2 < y1 {
            return Err(InvalidArgument::InvertedRectangle.into());
        }

        Ok(Self {
            x1,
            y1,
            x2,
            y2,
            precision,
        })
    }

    /// Callers guarantee `lower <= upper` on both axes.
    pub(crate) fn from_corners(lower: Point, upper: Point, precision: Precision) -> Self {
        Self {
            x1: lower.x(),
            y1: lower.y(),
            x2: upper.x(),
            y2: upper.y(),
            precision,
        }
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            point! {x: self.x1, y: self.y1},
            point! {x: self.x1, y: self.y2},
            point! {x: self.x2, y: self.y2},
            point! {x: self.x2, y: self.y1},
        ]
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x() >= self.x1 && p.x() <= self.x2 && p.y() >= self.y1 && p.y() <= self.y2
    }

    pub fn intersects_rect(&self, other: &RectShape) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    pub fn intersects_line(&self, line: &LineShape) -> bool {
        if self.contains_point(line.from) || self.contains_point(line.to) {
            return true;
        }

        let corners = self.corners();
        (0..4).any(|i| {
            math::segments_intersect(line.from, line.to, corners[i], corners[(i + 1) % 4])
        })
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        let dx = (self.x1 - p.x()).max(0.0).max(p.x() - self.x2);
        let dy = (self.y1 - p.y()).max(0.0).max(p.y() - self.y2);
        dx.hypot(dy)
    }

    pub fn distance_to_rect(&self, other: &RectShape) -> f64 {
        let dx = (self.x1 - other.x2).max(0.0).max(other.x1 - self.x2);
        let dy = (self.y1 - other.y2).max(0.0).max(other.y1 - self.y2);
        dx.hypot(dy)
    }

    pub fn distance_to_line(&self, line: &LineShape) -> f64 {
        if self.intersects_line(line) {
            return 0.0;
        }

        let corners = self.corners();
        (0..4)
            .map(|i| {
                math::segment_segment_distance(
                    line.from,
                    line.to,
                    corners[i],
                    corners[(i + 1) % 4],
                )
            })
            .fold(f64::INFINITY, f64::min)
    }
}

impl AccessShape for RectShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn mbr(&self) -> RectShape {
        *self
    }

    fn precision(&self) -> Precision {
        self.precision
    }
}

impl From<RectShape> for AABB<[f64; 2]> {
    fn from(rect: RectShape) -> Self {
        AABB::from_corners([rect.x1, rect.y1], [rect.x2, rect.y2])
    }
}

#[cfg(feature = "use-serde")]
#[derive(serde::Deserialize)]
struct RawRect {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    precision: Precision,
}

#[cfg(feature = "use-serde")]
impl TryFrom<RawRect> for RectShape {
    type Error = GeometryError;

    fn try_from(raw: RawRect) -> Result<Self, Self::Error> {
        Self::validated(raw.x1, raw.y1, raw.x2, raw.y2, raw.precision)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "use-serde", serde(try_from = "RawCircle"))]
pub struct CircleShape {
    pos: Point,
    r: f64,
}

impl CircleShape {
    pub fn new(x: f64, y: f64, r: f64) -> Result<Self, GeometryError> {
        if let Some(index) = [x, y].iter().position(|v| !v.is_finite()) {
            return Err(InvalidArgument::NonFiniteCoordinate { index }.into());
        }

        if !r.is_finite() || r < 0.0 {
            return Err(InvalidArgument::InvalidRadius(r).into());
        }

        Ok(Self {
            pos: point! {x: x, y: y},
            r,
        })
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.euclidean_distance(&self.pos) <= self.r
    }

    pub fn intersects_line(&self, line: &LineShape) -> bool {
        line.distance_to_point(self.pos) <= self.r
    }

    pub fn intersects_rect(&self, rect: &RectShape) -> bool {
        rect.distance_to_point(self.pos) <= self.r
    }

    pub fn intersects_circle(&self, other: &CircleShape) -> bool {
        self.pos.euclidean_distance(&other.pos) <= self.r + other.r
    }

    /// Gap between the disc and something at distance `d` from its center.
    fn gap(&self, d: f64) -> f64 {
        (d - self.r).max(0.0)
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        self.gap(p.euclidean_distance(&self.pos))
    }

    pub fn distance_to_line(&self, line: &LineShape) -> f64 {
        self.gap(line.distance_to_point(self.pos))
    }

    pub fn distance_to_rect(&self, rect: &RectShape) -> f64 {
        self.gap(rect.distance_to_point(self.pos))
    }

    pub fn distance_to_circle(&self, other: &CircleShape) -> f64 {
        other.gap(self.distance_to_point(other.pos))
    }
}

impl AccessShape for CircleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn mbr(&self) -> RectShape {
        RectShape::from_corners(
            point! {x: self.pos.x() - self.r, y: self.pos.y() - self.r},
            point! {x: self.pos.x() + self.r, y: self.pos.y() + self.r},
            Precision::Double,
        )
    }
}

#[cfg(feature = "use-serde")]
#[derive(serde::Deserialize)]
struct RawCircle {
    pos: Point,
    r: f64,
}

#[cfg(feature = "use-serde")]
impl TryFrom<RawCircle> for CircleShape {
    type Error = GeometryError;

    fn try_from(raw: RawCircle) -> Result<Self, Self::Error> {
        Self::new(raw.pos.x(), raw.pos.y(), raw.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_rejects_inverted_corners() {
        let err = RectShape::new(1.0, 0.0, 0.0, 1.0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(RectShape::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rect_line_intersection() {
        let rect = RectShape::new(0.0, 0.0, 1.0, 1.0).unwrap();

        assert!(rect.intersects_line(&LineShape::new(-1.0, 0.5, 2.0, 0.5)));
        assert!(rect.intersects_line(&LineShape::new(0.2, 0.2, 0.8, 0.8)));
        assert!(rect.intersects_line(&LineShape::new(1.0, 1.0, 3.0, 5.0)));
        assert!(!rect.intersects_line(&LineShape::new(2.0, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn test_circle_distances() {
        let circle = CircleShape::new(0.0, 0.0, 1.0).unwrap();
        let rect = RectShape::new(3.0, -1.0, 4.0, 1.0).unwrap();

        assert!((circle.distance_to_rect(&rect) - 2.0).abs() < 1e-12);
        assert_eq!(circle.distance_to_point(point! {x: 0.5, y: 0.0}), 0.0);
        assert!(circle.intersects_line(&LineShape::new(-2.0, 1.0, 2.0, 1.0)));
        assert!(!circle.intersects_line(&LineShape::new(-2.0, 1.5, 2.0, 1.5)));
    }

    #[test]
    fn test_circle_rejects_negative_radius() {
        assert!(CircleShape::new(0.0, 0.0, -1.0)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_single_precision_point() {
        let p = PointShape::new_single(1.5, 2.5);
        assert!(!p.is_double_precision());
        assert!(!p.mbr().is_double_precision());
        assert!(PointShape::new(1.5, 2.5).is_double_precision());
    }
}
