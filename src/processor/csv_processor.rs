use crate::errors::{AppError, AppResult};
use crate::types::{
    FixedParameters, InputSet, RawSection, RejectedRow, Scenario, ScenarioParameters,
    TimeoutSchedule, TreeDefaults, TreeParameters, TreeShape, FIXED_HEADERS, LIST_SEPARATOR,
    MAX_TREE_DEPTH, OPTIONAL_FIXED_HEADERS, SCENARIO_HEADERS,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Options controlling how an input table is ingested
#[derive(Debug, Clone, Default)]
pub struct IngestionOptions {
    /// Tree settings for fixed-section columns the file leaves out
    pub tree_defaults: TreeDefaults,
    /// Report and drop invalid scenario rows instead of aborting
    pub skip_invalid_rows: bool,
}

/// CSV processor for sectioned timeout-tree input tables
pub struct CsvProcessor {
    options: IngestionOptions,
}

/// A non-blank input row with its 1-based line number
struct Row {
    line: usize,
    cells: Vec<String>,
}

impl CsvProcessor {
    pub fn new(options: IngestionOptions) -> Self {
        Self { options }
    }

    /// Read and validate an input table from disk
    pub fn read_path(&self, path: &Path) -> AppResult<InputSet> {
        info!("Reading input table: {}", path.display());
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Read and validate an input table from any reader
    pub fn read<R: Read>(&self, reader: R) -> AppResult<InputSet> {
        let rows = Self::collect_rows(reader)?;
        let mut rows = rows.into_iter();

        let fixed_headers = rows.next().ok_or_else(|| {
            AppError::malformed(0, "Ac", "input has no fixed-parameter header row")
        })?;
        let fixed_values = rows.next().ok_or_else(|| {
            AppError::malformed(fixed_headers.line, "Ac", "missing fixed-parameter value row")
        })?;
        let scenario_headers = rows.next().ok_or_else(|| {
            AppError::malformed(fixed_values.line, "Fe", "missing scenario header row")
        })?;

        let fixed = self.parse_fixed(&fixed_headers, &fixed_values)?;
        Self::check_scenario_headers(&scenario_headers)?;

        let mut scenarios = Vec::new();
        let mut rejected = Vec::new();
        for row in rows {
            match Self::parse_scenario(&row) {
                Ok(scenario) => {
                    debug!("Scenario at line {}: {:?}", row.line, scenario.params);
                    scenarios.push(scenario);
                }
                Err(e) if self.options.skip_invalid_rows && e.is_record_error() => {
                    warn!("Skipping invalid scenario row: {}", e);
                    rejected.push(RejectedRow {
                        line: row.line,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Ingested {} scenario(s), {} rejected",
            scenarios.len(),
            rejected.len()
        );

        Ok(InputSet {
            fixed_section: RawSection {
                headers: fixed_headers.cells,
                values: fixed_values.cells,
            },
            fixed,
            scenario_headers: scenario_headers.cells,
            scenarios,
            rejected,
        })
    }

    /// Collect non-blank rows, dropping trailing empty cells left by spreadsheet exports
    fn collect_rows<R: Read>(reader: R) -> AppResult<Vec<Row>> {
        let mut csv_reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record: StringRecord = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or_default();

            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            while cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            if !cells.is_empty() {
                rows.push(Row { line, cells });
            }
        }
        Ok(rows)
    }

    fn parse_fixed(&self, headers: &Row, values: &Row) -> AppResult<FixedParameters> {
        for (i, expected) in FIXED_HEADERS.iter().enumerate() {
            match headers.cells.get(i) {
                Some(found) if found == expected => {}
                Some(found) => {
                    return Err(AppError::malformed(
                        headers.line,
                        expected,
                        format!(
                            "expected header '{}' in column {}, found '{}'",
                            expected,
                            i + 1,
                            found
                        ),
                    ))
                }
                None => {
                    return Err(AppError::malformed(
                        headers.line,
                        expected,
                        "required fixed-parameter header is missing",
                    ))
                }
            }
        }
        for extra in &headers.cells[FIXED_HEADERS.len()..] {
            if !OPTIONAL_FIXED_HEADERS.contains(&extra.as_str()) {
                return Err(AppError::malformed(
                    headers.line,
                    extra,
                    format!(
                        "unknown fixed-parameter header (expected one of {})",
                        OPTIONAL_FIXED_HEADERS.join(", ")
                    ),
                ));
            }
        }
        if values.cells.len() != headers.cells.len() {
            return Err(AppError::malformed(
                values.line,
                "Ac",
                format!(
                    "fixed section has {} header(s) but {} value(s)",
                    headers.cells.len(),
                    values.cells.len()
                ),
            ));
        }

        let mut by_name: HashMap<&str, &str> = HashMap::new();
        for (header, value) in headers.cells.iter().zip(&values.cells) {
            if by_name.insert(header.as_str(), value.as_str()).is_some() {
                return Err(AppError::malformed(headers.line, header, "duplicate header"));
            }
        }

        let line = values.line;
        let field = |name: &str| by_name.get(name).copied();
        let required = |name: &str| -> AppResult<u64> {
            let value = field(name)
                .ok_or_else(|| AppError::malformed(line, name, "required value is missing"))?;
            parse_count(line, name, value)
        };

        let defaults = &self.options.tree_defaults;
        let node_vbytes = match field("NS") {
            Some(v) => parse_count(line, "NS", v)?,
            None => defaults.node_vbytes,
        };

        let mut branching_factors = match field("Br") {
            Some(v) => parse_list(line, "Br", v)?,
            None => defaults.branching_factors.clone(),
        };
        branching_factors.sort_unstable();
        branching_factors.dedup();
        if branching_factors.is_empty() {
            return Err(AppError::malformed(line, "Br", "no branching factor given"));
        }

        let requested_depth = match field("Dp") {
            Some(v) => {
                let depth = parse_count(line, "Dp", v)?;
                u32::try_from(depth)
                    .map_err(|_| AppError::invariant(line, "Dp", "maximum depth is too large"))?
            }
            None => defaults.max_depth,
        };
        if requested_depth > MAX_TREE_DEPTH {
            return Err(AppError::invariant(
                line,
                "Dp",
                format!(
                    "maximum depth {} exceeds {}, the deepest tree with a 64-bit leaf count",
                    requested_depth,
                    MAX_TREE_DEPTH
                ),
            ));
        }

        // Reject degenerate sweep settings before any scenario is evaluated
        for &b in &branching_factors {
            TreeShape::new(requested_depth.min(1), b)?;
        }

        let schedule = match field("Ts") {
            Some(v) => TimeoutSchedule::explicit(parse_list(line, "Ts", v)?, line)?,
            None => {
                let level_timeout = match field("Td") {
                    Some(v) => parse_count(line, "Td", v)?,
                    None => defaults.level_timeout_blocks,
                };
                TimeoutSchedule::uniform(level_timeout, requested_depth, line)?
            }
        };
        let max_depth = if requested_depth > schedule.max_depth() {
            warn!(
                "Maximum depth {} exceeds the {}-level timeout schedule; sweeping to depth {}",
                requested_depth,
                schedule.max_depth(),
                schedule.max_depth()
            );
            schedule.max_depth()
        } else {
            requested_depth
        };

        let fixed = FixedParameters {
            active_blocks: required("Ac")?,
            rollover_blocks: required("Ro")?,
            avg_leaf_vbytes: required("AS")?,
            max_leaf_vbytes: required("MS")?,
            tree: TreeParameters {
                node_vbytes,
                branching_factors,
                max_depth,
                schedule,
            },
        };
        fixed.validate(line)?;
        Ok(fixed)
    }

    fn check_scenario_headers(headers: &Row) -> AppResult<()> {
        let matches = headers.cells.len() == SCENARIO_HEADERS.len()
            && headers
                .cells
                .iter()
                .zip(SCENARIO_HEADERS.iter())
                .all(|(found, expected)| found == expected);
        if matches {
            Ok(())
        } else {
            Err(AppError::malformed(
                headers.line,
                "Fe",
                format!(
                    "scenario headers must be '{}', found '{}'",
                    SCENARIO_HEADERS.join(","),
                    headers.cells.join(",")
                ),
            ))
        }
    }

    fn parse_scenario(row: &Row) -> AppResult<Scenario> {
        if row.cells.len() != SCENARIO_HEADERS.len() {
            return Err(AppError::malformed(
                row.line,
                "row",
                format!(
                    "expected {} values, found {}",
                    SCENARIO_HEADERS.len(),
                    row.cells.len()
                ),
            ));
        }
        let cell = |i: usize| row.cells[i].as_str();

        let params = ScenarioParameters {
            feerate: parse_real(row.line, "Fe", cell(0))?,
            feerate_exponent: parse_real(row.line, "Ex", cell(1))?,
            onchain_probability: parse_real(row.line, "Pr", cell(2))?,
            leaves: parse_count(row.line, "Le", cell(3))?,
            value_btc: parse_count(row.line, "Va", cell(4))?,
            cost_of_capital: parse_real(row.line, "Co", cell(5))?,
        };
        params.validate(row.line)?;

        Ok(Scenario {
            line: row.line,
            raw: row.cells.clone(),
            params,
        })
    }
}

/// Parse a non-negative integer; negatives are invariant violations, not type errors
fn parse_count(line: usize, field: &str, value: &str) -> AppResult<u64> {
    let parsed: i128 = value
        .parse()
        .map_err(|_| AppError::malformed(line, field, format!("not an integer: '{}'", value)))?;
    if parsed < 0 {
        return Err(AppError::invariant(
            line,
            field,
            format!("{} must be non-negative", parsed),
        ));
    }
    u64::try_from(parsed)
        .map_err(|_| AppError::malformed(line, field, format!("integer out of range: '{}'", value)))
}

fn parse_real(line: usize, field: &str, value: &str) -> AppResult<f64> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| AppError::malformed(line, field, format!("not a number: '{}'", value)))?;
    if !parsed.is_finite() {
        return Err(AppError::malformed(
            line,
            field,
            format!("not a finite number: '{}'", value),
        ));
    }
    Ok(parsed)
}

fn parse_list(line: usize, field: &str, value: &str) -> AppResult<Vec<u64>> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_count(line, field, s))
        .collect()
}
