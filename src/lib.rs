//! Closed family of 2D shapes for R-tree spatial indexes, with exact,
//! boundary-inclusive intersection predicates and convex polygon support.

pub mod geometry;
pub mod math;
