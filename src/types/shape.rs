//! Tree shapes swept by the scalability analysis

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Deepest tree whose leaf count fits in `u64` (a binary tree of depth 64
/// would need `2^64` leaves)
pub const MAX_TREE_DEPTH: u32 = 63;

/// A complete `branching_factor`-ary timeout-tree with `depth` levels of
/// internal nodes above the leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeShape {
    depth: u32,
    branching_factor: u64,
    leaf_count: u64,
    internal_node_count: u64,
}

impl TreeShape {
    /// Build a shape, rejecting zero depth, branching below two and shapes
    /// whose node counts overflow `u64`.
    pub fn new(depth: u32, branching_factor: u64) -> AppResult<Self> {
        if depth == 0 {
            return Err(AppError::degenerate(
                depth,
                branching_factor,
                "depth must be at least 1",
            ));
        }
        if depth > MAX_TREE_DEPTH {
            return Err(AppError::degenerate(
                depth,
                branching_factor,
                format!("depth must not exceed {}", MAX_TREE_DEPTH),
            ));
        }
        if branching_factor < 2 {
            return Err(AppError::degenerate(
                depth,
                branching_factor,
                "branching factor must be at least 2",
            ));
        }

        let leaf_count = branching_factor
            .checked_pow(depth)
            .ok_or_else(|| AppError::degenerate(depth, branching_factor, "leaf count overflows"))?;

        // Geometric sum over levels 0..depth-1
        let mut internal_node_count: u64 = 0;
        let mut level_width: u64 = 1;
        for _ in 0..depth {
            internal_node_count = internal_node_count
                .checked_add(level_width)
                .ok_or_else(|| {
                    AppError::degenerate(depth, branching_factor, "node count overflows")
                })?;
            level_width = level_width.saturating_mul(branching_factor);
        }
        leaf_count
            .checked_add(internal_node_count)
            .ok_or_else(|| AppError::degenerate(depth, branching_factor, "node count overflows"))?;

        Ok(Self {
            depth,
            branching_factor,
            leaf_count,
            internal_node_count,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn branching_factor(&self) -> u64 {
        self.branching_factor
    }

    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    pub fn internal_node_count(&self) -> u64 {
        self.internal_node_count
    }

    /// Every transaction in the tree, leaves included
    pub fn node_count(&self) -> u64 {
        self.internal_node_count + self.leaf_count
    }
}
