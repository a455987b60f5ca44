//! Error types for BVH construction.

use thiserror::Error;

/// Errors surfaced by [`crate::Bvh::new`].
///
/// Both are caller mistakes; a valid configuration over a non-empty primitive
/// set always builds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BvhError {
    #[error("Cannot build a BVH from an empty primitive set")]
    EmptyPrimitiveSet,

    #[error("Invalid max leaf size {0}: leaves must hold at least one primitive")]
    InvalidLeafSize(usize),
}
