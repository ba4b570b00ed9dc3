//! Scalability sweep report formatters
//!
//! The default rendering keeps one row per scenario holding its breakeven
//! shape and the flip shape that follows it. Table mode writes every
//! evaluated shape instead, flagging the breakeven row.

use super::tabular::SectionedTable;
use super::utils::{export_json, format_number, format_real};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::statistics::StatisticsCollector;
use crate::types::{ScalabilityResult, ScenarioSweep, SweepReport};
use crate::utils::currency::format_sats_as_btc_f64;
use crate::utils::time::blocks_to_days;

pub const SWEEP_TITLE: &str = "Timeout-Tree (TT) scalability sweep";

/// Result columns describing one evaluated shape
pub const SHAPE_COLUMNS: [&str; 11] = [
    "Depth",
    "Branching",
    "LeafCount",
    "InternalNodes",
    "LockupBlocks",
    "AnnualizedCapitalCost",
    "UnwindTransactions",
    "OnchainUnwindCost",
    "ExitPathTransactions",
    "ScalingFactor",
    "Viable",
];

pub const FLIP_COLUMNS: [&str; 3] = ["FlipDepth", "FlipBranching", "FlipLeafCount"];

pub const BREAKEVEN_FLAG_COLUMN: &str = "Breakeven";

fn shape_cells(r: &ScalabilityResult) -> Vec<String> {
    vec![
        r.depth.to_string(),
        r.branching_factor.to_string(),
        r.leaf_count.to_string(),
        r.internal_node_count.to_string(),
        r.lockup_blocks.to_string(),
        format_real(r.annualized_capital_cost),
        r.unwind_transactions.to_string(),
        format_real(r.onchain_unwind_cost),
        r.exit_path_transactions.to_string(),
        format_real(r.scaling_factor),
        r.viable.to_string(),
    ]
}

/// Breakeven cells; a scenario without a viable shape reports zero leaves
fn breakeven_cells(sweep: &ScenarioSweep) -> Vec<String> {
    let mut cells = match &sweep.breakeven.best {
        Some(best) => shape_cells(best),
        None => {
            let mut empty = vec![String::new(); SHAPE_COLUMNS.len()];
            empty[2] = "0".to_string();
            empty[9] = format_real(0.0);
            empty[10] = false.to_string();
            empty
        }
    };
    match &sweep.breakeven.flip {
        Some(flip) => cells.extend([
            flip.depth.to_string(),
            flip.branching_factor.to_string(),
            flip.leaf_count.to_string(),
        ]),
        None => cells.extend(std::iter::repeat(String::new()).take(FLIP_COLUMNS.len())),
    }
    cells
}

fn result_headers(report: &SweepReport, table: bool) -> Vec<String> {
    let mut headers = report.scenario_headers.clone();
    headers.extend(SHAPE_COLUMNS.iter().map(|s| s.to_string()));
    if table {
        headers.push(BREAKEVEN_FLAG_COLUMN.to_string());
    } else {
        headers.extend(FLIP_COLUMNS.iter().map(|s| s.to_string()));
    }
    headers
}

fn format_tabular(report: &SweepReport, table: bool, annotated: bool) -> AppResult<String> {
    let mut out = SectionedTable::new(annotated);
    out.title(SWEEP_TITLE)?;
    out.fixed_section(&report.fixed_section)?;

    let headers = result_headers(report, table);
    out.header(&headers)?;
    for sweep in &report.scenarios {
        if table {
            for r in &sweep.results {
                let mut cells = sweep.raw.clone();
                cells.extend(shape_cells(r));
                cells.push((sweep.breakeven.best.as_ref() == Some(r)).to_string());
                out.row(&cells)?;
            }
        } else {
            let mut cells = sweep.raw.clone();
            cells.extend(breakeven_cells(sweep));
            out.row(&cells)?;
        }
    }
    if annotated {
        out.header(&headers)?;
    }
    out.finish()
}

fn format_console(report: &SweepReport, table: bool) -> String {
    let mut output = String::new();
    output.push_str("=== TIMEOUT-TREE SCALABILITY SWEEP ===\n\n");
    for (header, value) in report
        .fixed_section
        .headers
        .iter()
        .zip(&report.fixed_section.values)
    {
        output.push_str(&format!("{:<4} {}\n", header, value));
    }

    for sweep in &report.scenarios {
        output.push_str(&format!(
            "\nLine {} [{}]\n",
            sweep.line,
            report
                .scenario_headers
                .iter()
                .zip(&sweep.raw)
                .map(|(h, v)| format!("{}={}", h, v))
                .collect::<Vec<_>>()
                .join(" ")
        ));
        output.push_str(&format!(
            "  {:>5} {:>4} {:>14} {:>10} {:>18} {:>16} {:>12} {:>7}\n",
            "Depth",
            "b",
            "Leaves",
            "Lockup (d)",
            "Capital (sats/yr)",
            "Unwind (sats)",
            "Scaling",
            "Viable"
        ));
        output.push_str(&format!("  {}\n", "-".repeat(94)));

        let rows: Vec<&ScalabilityResult> = if table {
            sweep.results.iter().collect()
        } else {
            sweep.breakeven.best.iter().chain(sweep.breakeven.flip.iter()).collect()
        };
        for r in rows {
            let marker = if sweep.breakeven.best.as_ref() == Some(r) { "*" } else { " " };
            output.push_str(&format!(
                "{} {:>5} {:>4} {:>14} {:>10.1} {:>18.2} {:>16.2} {:>12.2} {:>7}\n",
                marker,
                r.depth,
                r.branching_factor,
                format_number(r.leaf_count),
                blocks_to_days(r.lockup_blocks),
                r.annualized_capital_cost,
                r.onchain_unwind_cost,
                r.scaling_factor,
                if r.viable { "yes" } else { "no" },
            ));
        }
        match &sweep.breakeven.best {
            Some(best) => output.push_str(&format!(
                "  Breakeven: {} leaves, capital cost {} per year\n",
                format_number(best.leaf_count),
                format_sats_as_btc_f64(best.annualized_capital_cost)
            )),
            None => output.push_str("  No viable shape\n"),
        }
    }

    if !report.rejected.is_empty() {
        output.push_str("\n=== REJECTED ROWS ===\n");
        for rejected in &report.rejected {
            output.push_str(&format!("  Line {}: {}\n", rejected.line, rejected.reason));
        }
    }

    output.push_str(&format!("\n{}\n", "=".repeat(96)));
    output.push_str(&format!("{}\n", report.stats.summary()));
    output
}

/// Format a sweep report
pub fn format_sweep_report(
    report: &SweepReport,
    format: &OutputFormat,
    table: bool,
) -> AppResult<String> {
    match format {
        OutputFormat::Csv => format_tabular(report, table, false),
        OutputFormat::Annotated => format_tabular(report, table, true),
        OutputFormat::Console => Ok(format_console(report, table)),
        OutputFormat::Json => export_json(report),
    }
}
