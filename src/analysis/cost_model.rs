//! Per-shape cost model
//!
//! Compares the yearly opportunity cost of the capital a timeout-tree holds
//! against the fees of broadcasting the whole tree when every leaf exits.

use crate::errors::{AppError, AppResult};
use crate::types::{
    FixedParameters, ScalabilityResult, ScenarioParameters, TimeoutSchedule, TreeShape,
};
use crate::utils::time::blocks_to_years;

/// Cost model for one scenario, evaluated against any number of shapes
#[derive(Debug, Clone)]
pub struct CostModel<'a> {
    schedule: &'a TimeoutSchedule,
    leaf_value_sats: f64,
    cost_of_capital: f64,
    node_fee_sats: f64,
}

impl<'a> CostModel<'a> {
    pub fn new(fixed: &'a FixedParameters, scenario: &ScenarioParameters) -> Self {
        Self {
            schedule: &fixed.tree.schedule,
            leaf_value_sats: scenario.leaf_value_sats(),
            cost_of_capital: scenario.cost_of_capital,
            node_fee_sats: fixed.tree.node_vbytes as f64 * scenario.feerate,
        }
    }

    /// Fee to broadcast one tree node (sats)
    pub fn node_fee_sats(&self) -> f64 {
        self.node_fee_sats
    }

    pub fn leaf_value_sats(&self) -> f64 {
        self.leaf_value_sats
    }

    /// Evaluate one shape. Fails when the shape is deeper than the timeout schedule.
    pub fn evaluate(&self, shape: &TreeShape) -> AppResult<ScalabilityResult> {
        let depth = shape.depth();
        let lockup_blocks = self.schedule.lockup_blocks(depth).ok_or_else(|| {
            AppError::degenerate(
                depth,
                shape.branching_factor(),
                format!(
                    "depth exceeds the {}-level timeout schedule",
                    self.schedule.max_depth()
                ),
            )
        })?;

        let leaves = shape.leaf_count() as f64;
        let annualized_capital_cost =
            leaves * self.leaf_value_sats * self.cost_of_capital * blocks_to_years(lockup_blocks);

        let unwind_transactions = shape.node_count();
        let onchain_unwind_cost = unwind_transactions as f64 * self.node_fee_sats;

        // A single leaf publishes every ancestor, then its own leaf transaction
        let exit_path_transactions = u64::from(depth) + 1;
        let scaling_factor = leaves / exit_path_transactions as f64;

        Ok(ScalabilityResult {
            depth,
            branching_factor: shape.branching_factor(),
            leaf_count: shape.leaf_count(),
            internal_node_count: shape.internal_node_count(),
            lockup_blocks,
            annualized_capital_cost,
            unwind_transactions,
            onchain_unwind_cost,
            exit_path_transactions,
            scaling_factor,
            viable: annualized_capital_cost <= onchain_unwind_cost,
        })
    }
}
