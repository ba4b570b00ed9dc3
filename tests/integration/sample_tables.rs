//! End-to-end runs over the sample tables in `data/`

use crate::common::{sample_path, SAMPLE_COSTS_OF_CAPITAL};
use anyhow::Result;
use timeout_tree_analysis::analysis::{AnalysisEngine, OutputFormat, ReportFormatter};
use timeout_tree_analysis::processor::IngestionOptions;
use timeout_tree_analysis::types::SweepReport;

fn sweep_sample(number: u32) -> Result<SweepReport> {
    let engine = AnalysisEngine::from_path(&sample_path(number), &IngestionOptions::default())?;
    Ok(engine.run_sweep()?)
}

#[test]
fn test_samples_share_structure_and_differ_in_cost_of_capital() -> Result<()> {
    let reports = (1..=3).map(sweep_sample).collect::<Result<Vec<_>>>()?;
    for (report, co) in reports.iter().zip(SAMPLE_COSTS_OF_CAPITAL) {
        assert_eq!(report.fixed_section, reports[0].fixed_section);
        assert_eq!(report.scenarios.len(), reports[0].scenarios.len());
        assert!(report.scenarios.iter().all(|s| s.cost_of_capital == co));
        assert!(report.rejected.is_empty());
    }
    Ok(())
}

#[test]
fn test_breakeven_non_increasing_across_cost_of_capital() -> Result<()> {
    let reports = (1..=3).map(sweep_sample).collect::<Result<Vec<_>>>()?;
    for row in 0..reports[0].scenarios.len() {
        let breakevens: Vec<_> = reports.iter().map(|r| &r.scenarios[row].breakeven).collect();
        for pair in breakevens.windows(2) {
            assert!(
                pair[1].leaf_count() <= pair[0].leaf_count(),
                "row {}: leaf count grew from {} to {}",
                row,
                pair[0].leaf_count(),
                pair[1].leaf_count()
            );
            assert!(
                pair[1].scaling_factor() <= pair[0].scaling_factor(),
                "row {}: scaling factor grew from {} to {}",
                row,
                pair[0].scaling_factor(),
                pair[1].scaling_factor()
            );
        }
    }
    Ok(())
}

#[test]
fn test_dear_capital_leaves_cheap_blocks_without_viable_shape() -> Result<()> {
    // First row: 1 sat/vB base feerate, Co = 0.10
    let report = sweep_sample(3)?;
    let first = &report.scenarios[0];
    assert!(!first.breakeven.is_viable());
    assert_eq!(first.breakeven.leaf_count(), 0);
    assert_eq!(first.breakeven.scaling_factor(), 0.0);

    let csv = ReportFormatter::format_sweep_report(&report, &OutputFormat::Csv, false)?;
    assert!(csv.lines().nth(4).unwrap().contains(",,0,"));
    Ok(())
}

#[test]
fn test_security_delay_runs_over_every_sample() {
    for number in 1..=3 {
        let engine =
            AnalysisEngine::from_path(&sample_path(number), &IngestionOptions::default()).unwrap();
        let report = engine.run_security_delay().unwrap();
        assert_eq!(report.scenarios.len(), engine.input().scenarios.len());
        assert_eq!(report.stats.scenarios_processed, report.scenarios.len());

        let annotated =
            ReportFormatter::format_delay_report(&report, &OutputFormat::Annotated).unwrap();
        assert!(annotated.starts_with("Timeout-Tree (TT) analysis\n"));
    }
}
