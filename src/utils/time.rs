//! Block-time utilities
//!
//! Timelocks and delays are measured in blocks; capital costs are annual
//! rates, so every conversion goes through the average block cadence.

/// Blocks per day at the ten-minute target
pub const BLOCKS_PER_DAY: f64 = 144.0;

/// Average blocks per year (144 × 365.25 = 52596)
pub const BLOCKS_PER_YEAR: f64 = BLOCKS_PER_DAY * 365.25;

/// Convert a block count to years
///
/// # Examples
/// ```
/// use timeout_tree_analysis::utils::time::blocks_to_years;
/// assert_eq!(blocks_to_years(52_596), 1.0);
/// assert_eq!(blocks_to_years(0), 0.0);
/// ```
pub fn blocks_to_years(blocks: u64) -> f64 {
    blocks as f64 / BLOCKS_PER_YEAR
}

/// Convert a block count to days
pub fn blocks_to_days(blocks: u64) -> f64 {
    blocks as f64 / BLOCKS_PER_DAY
}
