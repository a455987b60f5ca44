//! Tree shape statistics.

use crate::BvhNode;
use serde::Serialize;
use std::fmt;

/// Summary of a built BVH's shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BvhStats {
    pub node_count: usize,
    pub branch_count: usize,
    pub leaf_count: usize,
    /// Primitives summed over all leaves
    pub primitive_count: usize,
    /// Depth of the deepest node (root = 0)
    pub max_depth: usize,
    /// Primitive count of the fullest leaf
    pub largest_leaf: usize,
    /// Leaves over the configured size, left by degenerate splits
    pub oversized_leaves: usize,
}

impl BvhStats {
    pub(crate) fn record<P: ?Sized>(
        &mut self,
        node: &BvhNode<'_, P>,
        depth: usize,
        max_leaf_size: usize,
    ) {
        self.node_count += 1;
        self.max_depth = self.max_depth.max(depth);

        if node.is_leaf() {
            let n = node.primitives().len();
            self.leaf_count += 1;
            self.primitive_count += n;
            self.largest_leaf = self.largest_leaf.max(n);
            if n > max_leaf_size {
                self.oversized_leaves += 1;
            }
        } else {
            self.branch_count += 1;
        }
    }
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} primitives, {} nodes ({} leaves), depth {}, largest leaf {}",
            self.primitive_count,
            self.node_count,
            self.leaf_count,
            self.max_depth,
            self.largest_leaf
        )?;
        if self.oversized_leaves > 0 {
            write!(f, ", {} oversized leaves", self.oversized_leaves)?;
        }
        Ok(())
    }
}
