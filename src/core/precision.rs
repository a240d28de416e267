//! Precision normalization for arithmetic results.
//!
//! Every raw result is passed through [`normalize`] before it is stored, so
//! binary floating-point noise (`0.1 + 0.2`) never reaches the display.

/// Significant digits kept by [`normalize`].
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Round `value` to [`SIGNIFICANT_DIGITS`] significant digits.
///
/// # Example
///
/// ```rust
/// use tapecalc::core::normalize;
///
/// assert_eq!(normalize(0.1 + 0.2), 0.3);
/// assert!(normalize(f64::NAN).is_nan());
/// ```
pub fn normalize(value: f64) -> f64 {
    normalize_to(value, SIGNIFICANT_DIGITS)
}

/// Round `value` to `digits` significant digits.
///
/// Non-finite values and zero pass through untouched. `digits` below one is
/// treated as one.
pub fn normalize_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let fraction = digits.max(1) - 1;
    format!("{value:.fraction$e}").parse().unwrap_or(value)
}
