//! Emitted reports re-read and re-evaluated

use crate::common::{ingest, skip_invalid, table_with_rows, write_input};
use csv::ReaderBuilder;
use timeout_tree_analysis::analysis::{AnalysisEngine, CostModel, OutputFormat, ReportFormatter};
use timeout_tree_analysis::errors::AppError;
use timeout_tree_analysis::processor::IngestionOptions;
use timeout_tree_analysis::types::TreeShape;

const ROWS: [&str; 4] = [
    "10,2,0.5,1000000,10000,0.01",
    "10,2,0.5,1000000,10000,-0.5",
    "25,1,0.5,1000000,10000,0.1",
    "5,3,0.2,65536,500,0.05",
];

/// Data rows of a plain sectioned CSV report (after the scenario header)
fn data_rows(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect::<Vec<_>>())
        .skip(4)
        .collect()
}

#[test]
fn test_sweep_table_reevaluates_exactly() {
    let input = ingest(&table_with_rows(&ROWS), skip_invalid()).unwrap();
    let fixed = input.fixed.clone();
    let scenarios = input.scenarios.clone();
    let report = AnalysisEngine::new(input, true).run_sweep().unwrap();
    let text = ReportFormatter::format_sweep_report(&report, &OutputFormat::Csv, true).unwrap();

    let rows = data_rows(&text);
    let expected_rows: usize = report.scenarios.iter().map(|s| s.results.len()).sum();
    assert_eq!(rows.len(), expected_rows);

    for row in &rows {
        let scenario = scenarios
            .iter()
            .find(|s| s.raw[..] == row[..6])
            .expect("emitted row matches an input scenario");
        let depth: u32 = row[6].parse().unwrap();
        let branching: u64 = row[7].parse().unwrap();
        let shape = TreeShape::new(depth, branching).unwrap();
        let result = CostModel::new(&fixed, &scenario.params).evaluate(&shape).unwrap();

        assert_eq!(row[8].parse::<u64>().unwrap(), result.leaf_count);
        assert_eq!(row[9].parse::<u64>().unwrap(), result.internal_node_count);
        assert_eq!(row[10].parse::<u64>().unwrap(), result.lockup_blocks);
        assert_eq!(row[11].parse::<f64>().unwrap(), result.annualized_capital_cost);
        assert_eq!(row[12].parse::<u64>().unwrap(), result.unwind_transactions);
        assert_eq!(row[13].parse::<f64>().unwrap(), result.onchain_unwind_cost);
        assert_eq!(row[14].parse::<u64>().unwrap(), result.exit_path_transactions);
        assert_eq!(row[15].parse::<f64>().unwrap(), result.scaling_factor);
        assert_eq!(row[16].parse::<bool>().unwrap(), result.viable);
    }
}

#[test]
fn test_rejected_row_absent_from_every_format() {
    let input = ingest(&table_with_rows(&ROWS), skip_invalid()).unwrap();
    assert_eq!(input.rejected.len(), 1);
    assert_eq!(input.rejected[0].line, 5);

    let engine = AnalysisEngine::new(input, true);
    let sweep = engine.run_sweep().unwrap();
    let delay = engine.run_security_delay().unwrap();
    assert_eq!(sweep.stats.scenarios_rejected, 1);

    for format in [OutputFormat::Csv, OutputFormat::Annotated] {
        for text in [
            ReportFormatter::format_sweep_report(&sweep, &format, false).unwrap(),
            ReportFormatter::format_sweep_report(&sweep, &format, true).unwrap(),
            ReportFormatter::format_delay_report(&delay, &format).unwrap(),
        ] {
            assert!(!text.contains("-0.5"), "{}", text);
        }
    }
}

#[test]
fn test_rows_emitted_in_input_order() {
    let input = ingest(&table_with_rows(&ROWS), skip_invalid()).unwrap();
    let report = AnalysisEngine::new(input, true).run_security_delay().unwrap();
    let text = ReportFormatter::format_delay_report(&report, &OutputFormat::Csv).unwrap();

    let feerates: Vec<String> = data_rows(&text).into_iter().map(|r| r[0].clone()).collect();
    assert_eq!(feerates, vec!["10", "25", "5"]);
}

#[test]
fn test_invalid_row_aborts_file_run_without_skip_policy() {
    let (_dir, path) = write_input("in_tt_analysis01.csv", &table_with_rows(&ROWS));
    let err = AnalysisEngine::from_path(&path, &IngestionOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, AppError::InvariantViolation { line: 5, .. }));

    let engine = AnalysisEngine::from_path(&path, &skip_invalid()).unwrap();
    assert_eq!(engine.input().scenarios.len(), 3);
}
