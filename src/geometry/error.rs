use thiserror::Error;

use crate::geometry::shape::ShapeKind;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperation),
}

impl GeometryError {
    /// The input data was malformed.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GeometryError::InvalidArgument(..))
    }

    /// The input was well-formed but asked for something that isn't implemented.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GeometryError::UnsupportedOperation(..))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidArgument {
    #[error("odd number of coordinate values ({count})")]
    OddCoordinateCount { count: usize },
    #[error("not enough distinct points to form a polygon ({distinct} found, 3 needed)")]
    NotEnoughPoints { distinct: usize },
    #[error("polygon has zero area: all vertices are collinear")]
    ZeroArea,
    #[error("coordinate at index {index} is not finite")]
    NonFiniteCoordinate { index: usize },
    #[error("rectangle corners are inverted")]
    InvertedRectangle,
    #[error("invalid circle radius {0}")]
    InvalidRadius(f64),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedOperation {
    #[error("only convex polygons are supported")]
    NonConvexPolygon,
    #[error("intersection of {0:?} with {1:?} is not supported")]
    Intersects(ShapeKind, ShapeKind),
    #[error("distance between {0:?} and {1:?} is not supported")]
    Distance(ShapeKind, ShapeKind),
}
