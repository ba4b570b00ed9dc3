//! Currency conversion and formatting for Bitcoin and satoshi values
//!
//! Scenario inputs carry value in whole BTC while every cost the model
//! produces is denominated in satoshis.

use bitcoin::Amount;

/// Satoshis per Bitcoin as a float, for cost arithmetic
pub fn sats_per_btc() -> f64 {
    Amount::ONE_BTC.to_sat() as f64
}

/// Convert a whole-BTC amount to satoshis
///
/// # Examples
/// ```
/// use timeout_tree_analysis::utils::currency::btc_to_sats;
///
/// assert_eq!(btc_to_sats(1), 100_000_000.0);
/// assert_eq!(btc_to_sats(0), 0.0);
/// ```
pub fn btc_to_sats(btc: u64) -> f64 {
    btc as f64 * sats_per_btc()
}

/// Format a floating-point satoshi amount as dual BTC + sats display
///
/// Used for model costs, which are rarely whole satoshis.
///
/// # Examples
/// ```
/// use timeout_tree_analysis::utils::currency::format_sats_as_btc_f64;
///
/// assert_eq!(
///     format_sats_as_btc_f64(22198.38),
///     "0.00022198 BTC (22198.38 sats)"
/// );
/// ```
pub fn format_sats_as_btc_f64(sats: f64) -> String {
    let btc = sats / sats_per_btc();
    format!("{:.8} BTC ({:.2} sats)", btc, sats)
}

/// Format a sat/vbyte feerate for console output
pub fn format_feerate(sats_per_vbyte: f64) -> String {
    format!("{:.2} sat/vB", sats_per_vbyte)
}
