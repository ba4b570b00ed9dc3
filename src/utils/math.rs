//! Numeric helpers shared by the analysers
//!
//! Zero-guarded percentages for summaries, and the fixed-iteration bisection
//! used by the security-delay search.

/// Calculate percentage safely for usize values, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use timeout_tree_analysis::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(1, 4), 25.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Fixed-iteration bisection on `[low, high]`.
///
/// At each step the midpoint is checked; when `go_lower(mid)` holds the upper
/// bound moves down to `mid`, otherwise the lower bound moves up. Returns the
/// last midpoint checked, not either bound, so the result may sit on either
/// side of the true crossing by at most `(high - low) / 2^iterations`.
///
/// Returns `low` when `iterations` is zero.
///
/// # Examples
/// ```
/// use timeout_tree_analysis::utils::math::bisect;
///
/// // Largest x with x*x <= 2
/// let root = bisect(0.0, 2.0, 50, |x| x * x > 2.0);
/// assert!((root - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn bisect<F>(mut low: f64, mut high: f64, iterations: usize, mut go_lower: F) -> f64
where
    F: FnMut(f64) -> bool,
{
    let mut mid = low;
    for _ in 0..iterations {
        mid = (low + high) / 2.0;
        if go_lower(mid) {
            high = mid;
        } else {
            low = mid;
        }
    }
    mid
}
