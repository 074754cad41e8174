#![allow(dead_code)]

use rtree_shapes::geometry::{self, Geometry, GeometryError};

pub const SIMPLE_SQUARE: [f64; 8] = [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0];
pub const SIMPLE_SQUARE_CLOSED: [f64; 10] = [-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
pub const SIMPLE_SQUARE_DUPLICATES: [f64; 14] = [
    -3.0, 0.0, -3.0, 0.0, -3.0, 0.0, 1.0, 4.0, 2.0, -5.0, -2.0, -10.0, -2.0, -10.0,
];

pub const PRECISION: f64 = 0.00001;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn square() -> Geometry {
    geometry::polygon(&SIMPLE_SQUARE).unwrap()
}

pub fn assert_intersects(a: &Geometry, b: &Geometry, expected: bool) {
    assert_eq!(a.intersects(b).unwrap(), expected, "{:?} vs {:?}", a, b);
    assert_eq!(b.intersects(a).unwrap(), expected, "{:?} vs {:?}", b, a);
}

pub fn assert_unsupported<T: std::fmt::Debug>(result: Result<T, GeometryError>) {
    match result {
        Err(err) => assert!(err.is_unsupported(), "expected unsupported, got {}", err),
        Ok(value) => panic!("expected unsupported, got {:?}", value),
    }
}

pub fn assert_invalid<T: std::fmt::Debug>(result: Result<T, GeometryError>) {
    match result {
        Err(err) => assert!(err.is_invalid_argument(), "expected invalid, got {}", err),
        Ok(value) => panic!("expected invalid, got {:?}", value),
    }
}
