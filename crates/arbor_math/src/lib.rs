//! Math types shared by the arbor acceleration structures.
//!
//! Re-exports glam and adds the interval, bounding box and ray types the
//! BVH is built on.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod aabb;

pub use interval::Interval;
pub use ray::Ray;
pub use aabb::Aabb;
