//! Security-delay analysis
//!
//! A timeout-tree's inactive lifetime (the security delay) must be long enough
//! for every leaf to reach the chain. Devoting a larger fraction `x` of each
//! block to leaves shortens the delay, and with it the capital cost, but
//! raises feerates. The expected per-leaf cost
//!
//! ```text
//! e(x) = Va·SATS·Co·AS / (BPY·BS·x) + Pr·AS·feerate(x)
//! ```
//!
//! is minimised over `x`, subject to the worst-case single-leaf fee
//! `MS·feerate(x)` never exceeding the casual user's funds in the leaf.

use super::feerate::{FeerateCurve, BLOCKSIZE_VBYTES};
use crate::errors::{AppError, AppResult};
use crate::types::{FixedParameters, Scenario, SecurityDelayResult};
use crate::utils::currency::btc_to_sats;
use crate::utils::math::bisect;
use crate::utils::time::{blocks_to_years, BLOCKS_PER_YEAR};
use tracing::debug;

/// Bisection iterations for both searches
pub const SEARCH_ITERATIONS: usize = 50;

/// Optimise the block-space fraction for one scenario and derive its metrics
pub fn analyse_security_delay(
    fixed: &FixedParameters,
    scenario: &Scenario,
) -> AppResult<SecurityDelayResult> {
    let p = &scenario.params;
    let curve = FeerateCurve::new(p.feerate, p.feerate_exponent);
    let avg_size = fixed.avg_leaf_vbytes as f64;
    let max_size = fixed.max_leaf_vbytes as f64;
    let value_sats = btc_to_sats(p.value_btc);
    let leaves = p.leaves as f64;

    let casual_user_funds = p.casual_user_funds_sats();
    if casual_user_funds <= max_size * p.feerate {
        return Err(AppError::invariant(
            scenario.line,
            "Fe",
            format!(
                "casual user's funds per leaf ({:.2} sats) must exceed the uncongested maximum fee ({:.2} sats)",
                casual_user_funds,
                max_size * p.feerate
            ),
        ));
    }

    // Largest x whose worst-case fee still fits in the casual user's funds
    let fee_bound = bisect(0.0, 1.0, SEARCH_ITERATIONS, |x| {
        max_size * curve.at(x) > casual_user_funds
    });

    // Minimise expected cost on [0, fee_bound] via the sign of its derivative
    let x = bisect(0.0, fee_bound, SEARCH_ITERATIONS, |x| {
        let capital_slope = -value_sats * p.cost_of_capital * avg_size
            / (BLOCKS_PER_YEAR * BLOCKSIZE_VBYTES * x * x);
        let fee_slope = p.onchain_probability * avg_size * curve.derivative(x);
        capital_slope + fee_slope > 0.0
    });
    debug!(
        "Line {}: fee bound x={:.6}, optimum x={:.6}",
        scenario.line, fee_bound, x
    );

    let onchain_fee = max_size * curve.at(x);
    let expected_onchain_fee = p.onchain_probability * avg_size * curve.at(x);

    // Free capital drives x towards zero, so the delay can outgrow a block count
    let delay = (leaves * avg_size / (BLOCKSIZE_VBYTES * x)).ceil();
    if !delay.is_finite() || delay >= u64::MAX as f64 {
        return Err(AppError::invariant(
            scenario.line,
            "Co",
            format!(
                "fraction {:e} gives a delay of {:.3e} blocks, beyond any block count",
                x,
                delay
            ),
        ));
    }
    let security_delay_blocks = delay as u64;
    let capital_cost = value_sats * p.cost_of_capital * delay / (BLOCKS_PER_YEAR * leaves);

    let lifetime = fixed.active_blocks as f64 + fixed.rollover_blocks as f64 + delay;
    let capital_efficiency = if lifetime > 0.0 {
        (2.0 / 3.0) * fixed.active_blocks as f64 / lifetime
    } else {
        0.0
    };

    Ok(SecurityDelayResult {
        fraction_tt_leaves: x,
        security_delay_blocks,
        security_delay_years: blocks_to_years(security_delay_blocks),
        capital_cost,
        capital_efficiency,
        onchain_fee,
        onchain_fee_fraction: onchain_fee / casual_user_funds,
        expected_onchain_fee,
        expected_overhead_fraction: (capital_cost + expected_onchain_fee) / casual_user_funds,
    })
}
