//! Result records produced by the analysers

use super::params::{RawSection, RejectedRow};
use super::statistics::ProcessingStats;
use serde::{Deserialize, Serialize};

/// Cost comparison for one tree shape under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalabilityResult {
    pub depth: u32,
    pub branching_factor: u64,
    pub leaf_count: u64,
    pub internal_node_count: u64,
    /// Root timeout: the longest a leaf may wait before it can be forced on-chain
    pub lockup_blocks: u64,
    /// Sats per year of opportunity cost on the capital held in the tree
    pub annualized_capital_cost: f64,
    /// Transactions broadcast when every leaf exits on-chain
    pub unwind_transactions: u64,
    /// Sats of fees to broadcast every node of the tree
    pub onchain_unwind_cost: f64,
    /// Transactions a single leaf publishes to reach the chain, its own included
    pub exit_path_transactions: u64,
    /// Leaves covered per transaction on one leaf's exit path
    pub scaling_factor: f64,
    pub viable: bool,
}

/// Crossing point of a sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakeven {
    /// Largest viable shape, `None` when nothing is viable
    pub best: Option<ScalabilityResult>,
    /// First non-viable shape after `best` in sweep order
    pub flip: Option<ScalabilityResult>,
}

impl Breakeven {
    /// Breakeven leaf count, zero when no shape is viable
    pub fn leaf_count(&self) -> u64 {
        self.best.as_ref().map(|r| r.leaf_count).unwrap_or(0)
    }

    /// Breakeven scaling factor, zero when no shape is viable
    pub fn scaling_factor(&self) -> f64 {
        self.best.as_ref().map(|r| r.scaling_factor).unwrap_or(0.0)
    }

    pub fn is_viable(&self) -> bool {
        self.best.is_some()
    }
}

/// Full sweep for one scenario row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSweep {
    pub line: usize,
    pub raw: Vec<String>,
    pub cost_of_capital: f64,
    /// Every evaluated shape, in sweep order
    pub results: Vec<ScalabilityResult>,
    pub breakeven: Breakeven,
}

/// Security-delay metrics for one scenario row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityDelayResult {
    /// Fraction of each block devoted to putting leaves on-chain
    pub fraction_tt_leaves: f64,
    pub security_delay_blocks: u64,
    pub security_delay_years: f64,
    /// Capital cost per leaf (sats)
    pub capital_cost: f64,
    /// Fraction of the funder's capital doing useful work for the casual user
    pub capital_efficiency: f64,
    /// Maximum fee to put one leaf on-chain (sats)
    pub onchain_fee: f64,
    pub onchain_fee_fraction: f64,
    /// Expected fee per leaf (sats)
    pub expected_onchain_fee: f64,
    pub expected_overhead_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelay {
    pub line: usize,
    pub raw: Vec<String>,
    pub result: SecurityDelayResult,
}

/// Report of a scalability sweep over one input table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub generated_at: String,
    pub fixed_section: RawSection,
    pub scenario_headers: Vec<String>,
    pub scenarios: Vec<ScenarioSweep>,
    pub rejected: Vec<RejectedRow>,
    pub stats: ProcessingStats,
}

/// Report of the security-delay analysis over one input table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayReport {
    pub generated_at: String,
    pub fixed_section: RawSection,
    pub scenario_headers: Vec<String>,
    pub scenarios: Vec<ScenarioDelay>,
    pub rejected: Vec<RejectedRow>,
    pub stats: ProcessingStats,
}
