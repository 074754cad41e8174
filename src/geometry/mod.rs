pub mod error;
pub mod intersects;
pub mod poly;
pub mod primitive;
pub mod shape;

pub use error::{GeometryError, InvalidArgument, UnsupportedOperation};
pub use intersects::{distance, intersects};
pub use poly::PolygonShape;
pub use primitive::{CircleShape, LineShape, PointShape, RectShape};
pub use shape::{AccessShape, Geometry, Precision, ShapeKind};

pub fn point(x: f64, y: f64) -> Geometry {
    PointShape::new(x, y).into()
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Geometry {
    LineShape::new(x1, y1, x2, y2).into()
}

pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Geometry, GeometryError> {
    Ok(RectShape::new(x1, y1, x2, y2)?.into())
}

pub fn circle(x: f64, y: f64, r: f64) -> Result<Geometry, GeometryError> {
    Ok(CircleShape::new(x, y, r)?.into())
}

pub fn polygon(coords: &[f64]) -> Result<Geometry, GeometryError> {
    Ok(PolygonShape::new(coords)?.into())
}
