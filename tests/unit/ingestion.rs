//! Input table ingestion: layout, defaults and validation errors

use crate::common::{ingest, skip_invalid, table_with_rows, SCENARIO_HEADER};
use timeout_tree_analysis::errors::AppError;
use timeout_tree_analysis::processor::IngestionOptions;
use timeout_tree_analysis::types::TreeDefaults;

#[test]
fn test_reads_fixed_and_scenario_sections() {
    let input = ingest(
        &table_with_rows(&["10,2,0.5,1000000,10000,0.01", "25,1,0.1,1000000,10000,0.1"]),
        IngestionOptions::default(),
    )
    .unwrap();

    assert_eq!(input.fixed.active_blocks, 4320);
    assert_eq!(input.fixed.rollover_blocks, 1008);
    assert_eq!(input.fixed.avg_leaf_vbytes, 250);
    assert_eq!(input.fixed.max_leaf_vbytes, 3000);
    assert_eq!(input.fixed.tree.branching_factors, vec![2, 4]);
    assert_eq!(input.fixed.tree.max_depth, 20);
    assert_eq!(input.fixed.tree.schedule.lockup_blocks(3), Some(3024));

    assert_eq!(input.scenarios.len(), 2);
    assert_eq!(input.scenarios[0].line, 4);
    assert_eq!(input.scenarios[1].params.feerate, 25.0);
    assert_eq!(input.scenarios[1].params.cost_of_capital, 0.1);
    assert_eq!(input.scenarios[1].raw[5], "0.1");
    assert_eq!(input.fixed_section.values[5], "2;4");
}

#[test]
fn test_minimal_fixed_section_uses_defaults() {
    let table = "\
Ac,Ro,AS,MS
4320,1008,250,3000
Fe,Ex,Pr,Le,Va,Co
10,2,0.5,1000000,10000,0.01
";
    let defaults = TreeDefaults {
        node_vbytes: 150,
        branching_factors: vec![3],
        max_depth: 6,
        level_timeout_blocks: 144,
    };
    let input = ingest(
        table,
        IngestionOptions {
            tree_defaults: defaults,
            skip_invalid_rows: false,
        },
    )
    .unwrap();

    assert_eq!(input.fixed.tree.node_vbytes, 150);
    assert_eq!(input.fixed.tree.branching_factors, vec![3]);
    assert_eq!(input.fixed.tree.max_depth, 6);
    assert_eq!(input.fixed.tree.schedule.levels(), &[144, 288, 432, 576, 720, 864]);
}

#[test]
fn test_explicit_schedule_caps_depth() {
    let table = "\
Ac,Ro,AS,MS,Ts,Dp
4320,1008,250,3000,1008;1440;2016,20
Fe,Ex,Pr,Le,Va,Co
10,2,0.5,1000000,10000,0.01
";
    let input = ingest(table, IngestionOptions::default()).unwrap();
    assert_eq!(input.fixed.tree.max_depth, 3);
    assert_eq!(input.fixed.tree.schedule.lockup_blocks(2), Some(1440));
    assert_eq!(input.fixed.tree.schedule.lockup_blocks(4), None);
}

#[test]
fn test_oversized_depth_rejected_before_building_schedule() {
    for depth in ["64", "4000000000"] {
        let table = format!(
            "Ac,Ro,AS,MS,Dp\n4320,1008,250,3000,{}\n{}10,2,0.5,1000000,10000,0.01\n",
            depth,
            SCENARIO_HEADER
        );
        let err = ingest(&table, IngestionOptions::default()).unwrap_err();
        assert!(
            matches!(err, AppError::InvariantViolation { line: 2, ref field, .. } if field == "Dp"),
            "Dp={}: {}",
            depth,
            err
        );
    }
}

#[test]
fn test_oversized_default_depth_rejected() {
    let table = "Ac,Ro,AS,MS\n4320,1008,250,3000\nFe,Ex,Pr,Le,Va,Co\n";
    let options = IngestionOptions {
        tree_defaults: TreeDefaults {
            max_depth: u32::MAX,
            ..TreeDefaults::default()
        },
        ..IngestionOptions::default()
    };
    let err = ingest(table, options).unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation { ref field, .. } if field == "Dp"));
}

#[test]
fn test_non_increasing_schedule_rejected() {
    let table = "\
Ac,Ro,AS,MS,Ts
4320,1008,250,3000,1008;1008
Fe,Ex,Pr,Le,Va,Co
10,2,0.5,1000000,10000,0.01
";
    let err = ingest(table, skip_invalid()).unwrap_err();
    match err {
        AppError::InvariantViolation { line, field, .. } => {
            assert_eq!(line, 2);
            assert_eq!(field, "Ts");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_wrong_fixed_header_rejected() {
    let table = "\
Ac,Ro,MS,AS
4320,1008,3000,250
Fe,Ex,Pr,Le,Va,Co
";
    let err = ingest(table, IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MalformedInput { line: 1, .. }));
}

#[test]
fn test_unknown_optional_header_rejected() {
    let table = "\
Ac,Ro,AS,MS,Xx
4320,1008,250,3000,1
Fe,Ex,Pr,Le,Va,Co
";
    let err = ingest(table, IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MalformedInput { ref field, .. } if field == "Xx"));
}

#[test]
fn test_wrong_scenario_header_rejected() {
    let table = "\
Ac,Ro,AS,MS
4320,1008,250,3000
Fe,Ex,Pr,Le,Co,Va
";
    let err = ingest(table, IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MalformedInput { line: 3, .. }));
}

#[test]
fn test_max_size_below_average_size_rejected() {
    let table = "\
Ac,Ro,AS,MS
4320,1008,3000,250
Fe,Ex,Pr,Le,Va,Co
";
    let err = ingest(table, IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation { ref field, .. } if field == "MS"));
}

#[test]
fn test_degenerate_branching_factor_rejected() {
    let table = "\
Ac,Ro,AS,MS,Br
4320,1008,250,3000,1;2
Fe,Ex,Pr,Le,Va,Co
10,2,0.5,1000000,10000,0.01
";
    let err = ingest(table, IngestionOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        AppError::DegenerateShape {
            branching_factor: 1,
            ..
        }
    ));
}

#[test]
fn test_negative_cost_of_capital_aborts_by_default() {
    let table = table_with_rows(&["10,2,0.5,1000000,10000,0.01", "10,2,0.5,1000000,10000,-0.01"]);
    let err = ingest(&table, IngestionOptions::default()).unwrap_err();
    match err {
        AppError::InvariantViolation { line, field, .. } => {
            assert_eq!(line, 5);
            assert_eq!(field, "Co");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_skip_policy_drops_invalid_rows() {
    let table = table_with_rows(&[
        "10,2,0.5,1000000,10000,0.01",
        "10,2,0.5,1000000,10000,-0.01",
        "10,2,abc,1000000,10000,0.01",
        "10,2,0.5,1000000,10000",
        "10,2,0.5,1000000,10000,0.1",
    ]);
    let input = ingest(&table, skip_invalid()).unwrap();

    let lines: Vec<usize> = input.scenarios.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![4, 8]);
    let rejected: Vec<usize> = input.rejected.iter().map(|r| r.line).collect();
    assert_eq!(rejected, vec![5, 6, 7]);
    assert!(input.rejected[1].reason.contains("'Pr'"));
}

#[test]
fn test_comments_blank_lines_and_trailing_cells_ignored() {
    let table = "\
# sample table
Ac,Ro,AS,MS,,
4320,1008,250,3000,,

Fe,Ex,Pr,Le,Va,Co,
10, 2, 0.5, 1000000, 10000, 0.01
";
    let input = ingest(table, IngestionOptions::default()).unwrap();
    assert_eq!(input.fixed_section.headers.len(), 4);
    assert_eq!(input.scenarios.len(), 1);
    assert_eq!(input.scenarios[0].params.feerate_exponent, 2.0);
}

#[test]
fn test_empty_input_rejected() {
    let err = ingest("", IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::MalformedInput { .. }));
}
