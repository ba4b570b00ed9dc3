//! Security-delay report formatters

use super::tabular::SectionedTable;
use super::utils::{export_json, format_number, format_real};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::statistics::StatisticsCollector;
use crate::types::{DelayReport, SecurityDelayResult};
use crate::utils::currency::format_feerate;

pub const DELAY_TITLE: &str = "Timeout-Tree (TT) analysis";

/// Result columns appended to each scenario row
pub const DELAY_COLUMNS: [&str; 9] = [
    "FractionTTLeaves",
    "SecurityDelayBlocks",
    "SecurityDelayYears",
    "CapitalCost",
    "CapitalEfficiency",
    "OnchainFee",
    "OnchainFeeFraction",
    "ExpectedOnchainFee",
    "ExpectedOverheadFraction",
];

fn result_cells(r: &SecurityDelayResult) -> Vec<String> {
    vec![
        format_real(r.fraction_tt_leaves),
        r.security_delay_blocks.to_string(),
        format_real(r.security_delay_years),
        format_real(r.capital_cost),
        format_real(r.capital_efficiency),
        format_real(r.onchain_fee),
        format_real(r.onchain_fee_fraction),
        format_real(r.expected_onchain_fee),
        format_real(r.expected_overhead_fraction),
    ]
}

fn format_tabular(report: &DelayReport, annotated: bool) -> AppResult<String> {
    let mut out = SectionedTable::new(annotated);
    out.title(DELAY_TITLE)?;
    out.fixed_section(&report.fixed_section)?;

    let mut headers = report.scenario_headers.clone();
    headers.extend(DELAY_COLUMNS.iter().map(|s| s.to_string()));
    out.header(&headers)?;
    for scenario in &report.scenarios {
        let mut cells = scenario.raw.clone();
        cells.extend(result_cells(&scenario.result));
        out.row(&cells)?;
    }
    if annotated {
        out.header(&headers)?;
    }
    out.finish()
}

fn format_console(report: &DelayReport) -> String {
    let mut output = String::new();
    output.push_str("=== TIMEOUT-TREE SECURITY DELAY ===\n\n");
    output.push_str(&format!(
        "{:>6} {:>12} {:>6} {:>14} {:>10} | {:>9} {:>12} {:>8} {:>14} {:>10} {:>10} {:>10}\n",
        "Line",
        "Fe",
        "Co",
        "Leaves",
        "Va (BTC)",
        "x",
        "Delay (blk)",
        "Years",
        "Capital/leaf",
        "Efficiency",
        "Max fee",
        "Overhead"
    ));
    output.push_str(&format!("{}\n", "-".repeat(140)));

    for scenario in &report.scenarios {
        let p = &scenario.raw;
        let cell = |i: usize| p.get(i).map(String::as_str).unwrap_or("");
        let r = &scenario.result;
        let feerate = cell(0)
            .parse::<f64>()
            .map(format_feerate)
            .unwrap_or_else(|_| cell(0).to_string());
        output.push_str(&format!(
            "{:>6} {:>12} {:>6} {:>14} {:>10} | {:>9.6} {:>12} {:>8.3} {:>14.2} {:>9.2}% {:>10.0} {:>9.4}%\n",
            scenario.line,
            feerate,
            cell(5),
            cell(3),
            cell(4),
            r.fraction_tt_leaves,
            format_number(r.security_delay_blocks),
            r.security_delay_years,
            r.capital_cost,
            r.capital_efficiency * 100.0,
            r.onchain_fee,
            r.expected_overhead_fraction * 100.0,
        ));
    }

    if !report.rejected.is_empty() {
        output.push_str("\n=== REJECTED ROWS ===\n");
        for rejected in &report.rejected {
            output.push_str(&format!("  Line {}: {}\n", rejected.line, rejected.reason));
        }
    }

    output.push_str(&format!("\n{}\n", "=".repeat(140)));
    output.push_str(&format!("{}\n", report.stats.summary()));
    output
}

/// Format a security-delay report
pub fn format_delay_report(report: &DelayReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Csv => format_tabular(report, false),
        OutputFormat::Annotated => format_tabular(report, true),
        OutputFormat::Console => Ok(format_console(report)),
        OutputFormat::Json => export_json(report),
    }
}
