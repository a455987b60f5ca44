//! BVH build configuration.

use crate::BvhError;
use serde::{Deserialize, Serialize};

/// Maximum primitives per leaf node before splitting.
pub const DEFAULT_MAX_LEAF_SIZE: usize = 4;

/// Construction parameters for [`crate::Bvh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// A node holding this many primitives or fewer becomes a leaf.
    pub max_leaf_size: usize,
}

impl BvhConfig {
    pub fn new(max_leaf_size: usize) -> Self {
        Self { max_leaf_size }
    }

    /// Check the configuration before building.
    pub fn validate(&self) -> Result<(), BvhError> {
        if self.max_leaf_size == 0 {
            return Err(BvhError::InvalidLeafSize(self.max_leaf_size));
        }
        Ok(())
    }
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
        }
    }
}
