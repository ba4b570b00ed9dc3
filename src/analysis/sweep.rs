//! Sweep / breakeven driver
//!
//! Evaluates every candidate tree shape for a scenario in increasing order of
//! leaf count and locates the largest shape whose capital cost stays within
//! its on-chain unwind cost.

use super::cost_model::CostModel;
use crate::errors::AppResult;
use crate::types::{
    Breakeven, FixedParameters, ScalabilityResult, Scenario, ScenarioSweep, TreeParameters,
    TreeShape,
};
use std::cmp::Ordering;
use tracing::debug;

/// Candidate shapes in sweep order: ascending leaf count, shallower first on ties.
///
/// Depth runs from 1 to the configured maximum for every branching factor and
/// stops early once a tree would hold more than `leaf_limit` leaves.
pub fn candidate_shapes(tree: &TreeParameters, leaf_limit: u64) -> Vec<TreeShape> {
    let mut shapes = Vec::new();
    for &branching_factor in &tree.branching_factors {
        for depth in 1..=tree.max_depth {
            match branching_factor.checked_pow(depth) {
                Some(leaves) if leaves <= leaf_limit => {}
                _ => break,
            }
            match TreeShape::new(depth, branching_factor) {
                Ok(shape) => shapes.push(shape),
                Err(e) => {
                    debug!("Sweep for branching {} stops: {}", branching_factor, e);
                    break;
                }
            }
        }
    }
    shapes.sort_by_key(|s| (s.leaf_count(), s.depth()));
    shapes
}

/// Locate the breakeven in results ordered as the sweep produced them.
///
/// The best shape is the viable one with the most leaves (ties go to the
/// larger scaling factor). The flip is the first non-viable shape after it,
/// or the first non-viable shape overall when nothing is viable.
pub fn find_breakeven(results: &[ScalabilityResult]) -> Breakeven {
    let best_index = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.viable)
        .max_by(|(_, a), (_, b)| {
            a.leaf_count.cmp(&b.leaf_count).then(
                a.scaling_factor
                    .partial_cmp(&b.scaling_factor)
                    .unwrap_or(Ordering::Equal),
            )
        })
        .map(|(i, _)| i);

    let search_from = best_index.map(|i| i + 1).unwrap_or(0);
    let flip = results[search_from..].iter().find(|r| !r.viable).cloned();

    Breakeven {
        best: best_index.map(|i| results[i].clone()),
        flip,
    }
}

/// Sweep every candidate shape for one scenario
pub fn sweep_scenario(fixed: &FixedParameters, scenario: &Scenario) -> AppResult<ScenarioSweep> {
    let model = CostModel::new(fixed, &scenario.params);
    let shapes = candidate_shapes(&fixed.tree, scenario.params.leaves);

    let results = shapes
        .iter()
        .map(|shape| model.evaluate(shape))
        .collect::<AppResult<Vec<_>>>()?;
    let breakeven = find_breakeven(&results);

    debug!(
        "Line {}: {} shape(s) evaluated, breakeven at {} leaves",
        scenario.line,
        results.len(),
        breakeven.leaf_count()
    );

    Ok(ScenarioSweep {
        line: scenario.line,
        raw: scenario.raw.clone(),
        cost_of_capital: scenario.params.cost_of_capital,
        results,
        breakeven,
    })
}
