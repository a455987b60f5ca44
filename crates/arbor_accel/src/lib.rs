//! Arbor - bounding volume hierarchy for ray queries.
//!
//! Builds a binary BVH over borrowed primitives and answers two kinds of
//! ray query against it: whether anything is hit, and which hit is nearest.

mod primitive;
mod counter;
mod config;
mod error;
mod sphere;
mod triangle;
mod cuboid;
mod list;
mod bvh;
mod stats;

pub use primitive::{Intersection, Primitive};
pub use counter::IntersectionCounter;
pub use config::{BvhConfig, DEFAULT_MAX_LEAF_SIZE};
pub use error::BvhError;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use cuboid::Cuboid;
pub use list::PrimitiveList;
pub use bvh::{Bvh, BvhNode, Leaves};
pub use stats::BvhStats;

/// Re-export common math types from arbor_math
pub use arbor_math::{Aabb, Interval, Ray, Vec3};
