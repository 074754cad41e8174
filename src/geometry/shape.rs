use enum_dispatch::enum_dispatch;
use rstar::{RTreeObject, AABB};

use crate::geometry::{
    error::GeometryError,
    intersects,
    poly::PolygonShape,
    primitive::{CircleShape, LineShape, PointShape, RectShape},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Point,
    Line,
    Rectangle,
    Circle,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    Single,
    Double,
}

#[enum_dispatch]
pub trait AccessShape {
    fn kind(&self) -> ShapeKind;

    /// Minimum bounding rectangle.
    fn mbr(&self) -> RectShape;

    fn precision(&self) -> Precision {
        Precision::Double
    }

    fn is_double_precision(&self) -> bool {
        self.precision() == Precision::Double
    }
}

/// The closed set of shapes a spatial index can hold.
///
/// Two geometries of different kinds never compare equal, even when their
/// coordinates coincide.
#[enum_dispatch(AccessShape)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(PointShape),
    Line(LineShape),
    Rectangle(RectShape),
    Circle(CircleShape),
    Polygon(PolygonShape),
}

impl Geometry {
    pub fn intersects(&self, other: &Geometry) -> Result<bool, GeometryError> {
        intersects::intersects(self, other)
    }

    pub fn distance(&self, other: &Geometry) -> Result<f64, GeometryError> {
        intersects::distance(self, other)
    }
}

impl RTreeObject for Geometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.mbr().into()
    }
}
