//! Input parameter types
//!
//! An input table has a fixed section shared by every scenario (tree
//! lifetime, transaction sizes and the tree-shape sweep settings) followed by
//! one row per scenario (feerate curve, on-chain probability, leaf count,
//! value and cost of capital).

use crate::errors::{AppError, AppResult};
use crate::utils::currency::btc_to_sats;
use serde::{Deserialize, Serialize};

/// Required fixed-section headers, in order
pub const FIXED_HEADERS: [&str; 4] = ["Ac", "Ro", "AS", "MS"];

/// Optional fixed-section headers (tree sweep settings), any order after `MS`
pub const OPTIONAL_FIXED_HEADERS: [&str; 5] = ["NS", "Br", "Dp", "Td", "Ts"];

/// Scenario headers, in order
pub const SCENARIO_HEADERS: [&str; 6] = ["Fe", "Ex", "Pr", "Le", "Va", "Co"];

/// Separator for list-valued cells (`Br`, `Ts`)
pub const LIST_SEPARATOR: char = ';';

/// Per-level timeouts of a timeout-tree, bottom level first.
///
/// Entry `k` is the timeout (in blocks, counted from tree creation) of the
/// nodes `k + 1` levels above the leaves. A parent always times out strictly
/// after its children, so entries are positive and strictly increasing, and
/// the root's entry is the cumulative window a leaf may have to wait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutSchedule {
    levels: Vec<u64>,
}

impl TimeoutSchedule {
    /// Validate an explicit schedule read from the `Ts` column
    pub fn explicit(levels: Vec<u64>, line: usize) -> AppResult<Self> {
        if levels.is_empty() {
            return Err(AppError::malformed(line, "Ts", "timeout schedule is empty"));
        }
        if let Some(pos) = levels.iter().position(|&t| t == 0) {
            return Err(AppError::invariant(
                line,
                "Ts",
                format!("timeout at level {} must be positive", pos + 1),
            ));
        }
        for (i, pair) in levels.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(AppError::invariant(
                    line,
                    "Ts",
                    format!(
                        "parent timeout {} at level {} does not exceed child timeout {} at level {}",
                        pair[1],
                        i + 2,
                        pair[0],
                        i + 1
                    ),
                ));
            }
        }
        Ok(Self { levels })
    }

    /// Schedule where every level adds the same window: level `k` times out
    /// after `k * level_timeout_blocks`
    pub fn uniform(level_timeout_blocks: u64, max_depth: u32, line: usize) -> AppResult<Self> {
        if level_timeout_blocks == 0 {
            return Err(AppError::invariant(
                line,
                "Td",
                "per-level timeout must be positive",
            ));
        }
        let levels = (1..=u64::from(max_depth))
            .map(|k| {
                k.checked_mul(level_timeout_blocks).ok_or_else(|| {
                    AppError::invariant(line, "Td", format!("timeout overflows at level {}", k))
                })
            })
            .collect::<AppResult<Vec<u64>>>()?;
        Self::explicit(levels, line)
    }

    /// Blocks a leaf of a depth-`depth` tree may wait before it can be forced
    /// on-chain, or `None` when the schedule is shorter than `depth`
    pub fn lockup_blocks(&self, depth: u32) -> Option<u64> {
        if depth == 0 {
            return None;
        }
        self.levels.get(depth as usize - 1).copied()
    }

    /// Deepest tree the schedule covers
    pub fn max_depth(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn levels(&self) -> &[u64] {
        &self.levels
    }
}

/// Tree-shape sweep settings used when the fixed section omits them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDefaults {
    pub node_vbytes: u64,
    pub branching_factors: Vec<u64>,
    pub max_depth: u32,
    pub level_timeout_blocks: u64,
}

impl Default for TreeDefaults {
    fn default() -> Self {
        Self {
            node_vbytes: 200,
            branching_factors: vec![2],
            max_depth: 20,
            level_timeout_blocks: 1008, // one week per level
        }
    }
}

/// Tree-shape sweep settings after ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeParameters {
    /// vbytes of one tree-node transaction
    pub node_vbytes: u64,
    /// Branching factors to sweep, ascending and de-duplicated
    pub branching_factors: Vec<u64>,
    /// Deepest tree to sweep (never beyond the schedule)
    pub max_depth: u32,
    pub schedule: TimeoutSchedule,
}

/// Parameters shared by every scenario in one input table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedParameters {
    /// Active lifetime of each tree (blocks)
    pub active_blocks: u64,
    /// Rollover period of each tree (blocks)
    pub rollover_blocks: u64,
    /// Average vbytes to put one leaf on-chain when all leaves go on-chain
    pub avg_leaf_vbytes: u64,
    /// Maximum vbytes to put one leaf on-chain when it goes alone
    pub max_leaf_vbytes: u64,
    pub tree: TreeParameters,
}

impl FixedParameters {
    /// Check cross-field constraints of the fixed section
    pub fn validate(&self, line: usize) -> AppResult<()> {
        if self.max_leaf_vbytes < self.avg_leaf_vbytes {
            return Err(AppError::invariant(
                line,
                "MS",
                format!(
                    "maximum leaf size {} is below average leaf size {}",
                    self.max_leaf_vbytes, self.avg_leaf_vbytes
                ),
            ));
        }
        if self.tree.node_vbytes == 0 {
            return Err(AppError::invariant(
                line,
                "NS",
                "node size must be positive",
            ));
        }
        Ok(())
    }
}

/// One scenario row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Feerate (sat/vB) with no tree leaves in blocks
    pub feerate: f64,
    /// Exponent of feerate growth as leaves fill blocks
    pub feerate_exponent: f64,
    /// Probability a tree is put on-chain
    pub onchain_probability: f64,
    /// Leaves across all trees
    pub leaves: u64,
    /// Value (BTC) of all leaves together
    pub value_btc: u64,
    /// Annual cost of capital, as a fraction
    pub cost_of_capital: f64,
}

impl ScenarioParameters {
    /// Check the numeric ranges every analysis relies on
    pub fn validate(&self, line: usize) -> AppResult<()> {
        if self.feerate < 0.0 {
            return Err(AppError::invariant(
                line,
                "Fe",
                format!("feerate {} is negative", self.feerate),
            ));
        }
        if self.feerate_exponent <= 0.0 {
            return Err(AppError::invariant(
                line,
                "Ex",
                format!("feerate exponent {} must be positive", self.feerate_exponent),
            ));
        }
        if !(0.0..=1.0).contains(&self.onchain_probability) {
            return Err(AppError::invariant(
                line,
                "Pr",
                format!(
                    "probability {} is outside [0, 1]",
                    self.onchain_probability
                ),
            ));
        }
        if self.leaves == 0 {
            return Err(AppError::invariant(line, "Le", "leaf count must be positive"));
        }
        if self.cost_of_capital < 0.0 {
            return Err(AppError::invariant(
                line,
                "Co",
                format!("cost of capital {} is negative", self.cost_of_capital),
            ));
        }
        if self.cost_of_capital > 1.0 {
            return Err(AppError::invariant(
                line,
                "Co",
                format!("cost of capital {} exceeds 1.0", self.cost_of_capital),
            ));
        }
        Ok(())
    }

    /// Nominal value of one leaf in satoshis
    pub fn leaf_value_sats(&self) -> f64 {
        btc_to_sats(self.value_btc) / self.leaves as f64
    }

    /// Casual user's funds per leaf in satoshis.
    ///
    /// Each leaf's funds are split evenly between the casual user's immediate
    /// bitcoin, the casual user's Lightning balance and the dedicated user's
    /// Lightning balance, so two thirds belong to the casual user.
    pub fn casual_user_funds_sats(&self) -> f64 {
        2.0 * btc_to_sats(self.value_btc) / (3.0 * self.leaves as f64)
    }
}

/// A scenario row with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// 1-based line in the input file
    pub line: usize,
    /// Cells as they appeared in the input, echoed into the output
    pub raw: Vec<String>,
    pub params: ScenarioParameters,
}

/// Scenario row rejected under the skip-invalid policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: String,
}

/// A header row with the row of values under it, echoed verbatim into outputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSection {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

/// A fully ingested input table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSet {
    pub fixed_section: RawSection,
    pub fixed: FixedParameters,
    pub scenario_headers: Vec<String>,
    pub scenarios: Vec<Scenario>,
    pub rejected: Vec<RejectedRow>,
}
