//! Display formatting for numbers and entry text.

use super::entry::parse_number;

/// Magnitudes above this render in exponent notation.
pub const UPPER_FIXED_LIMIT: f64 = 999_999_999_999.0;

/// Nonzero magnitudes below this render in exponent notation.
pub const LOWER_FIXED_LIMIT: f64 = 1e-10;

/// Rendered for infinite values.
pub const INFINITY_TEXT: &str = "∞";

/// Formatting limits for the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Digits allowed before [`NumberFormat::clamp_length`] collapses text.
    pub max_digits: usize,
    /// Fractional digits computed for fixed-point output.
    pub fraction_digits: usize,
    /// Fractional digits in exponent notation.
    pub exponent_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            max_digits: 14,
            fraction_digits: 12,
            exponent_digits: 6,
        }
    }
}

impl NumberFormat {
    /// Render a number for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tapecalc::core::NumberFormat;
    ///
    /// let format = NumberFormat::default();
    /// assert_eq!(format.format(1234567.5), "1,234,567.5");
    /// assert_eq!(format.format(2e12), "2.000000e12");
    /// assert_eq!(format.format(f64::INFINITY), "∞");
    /// ```
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return INFINITY_TEXT.to_string();
        }
        let magnitude = value.abs();
        if magnitude > UPPER_FIXED_LIMIT || (magnitude != 0.0 && magnitude < LOWER_FIXED_LIMIT) {
            return to_exponential(value, self.exponent_digits);
        }

        // Negative zero and values rounding to it print as "0".
        let value = if value == 0.0 { 0.0 } else { value };
        let fixed = format!("{value:.prec$}", prec = self.fraction_digits);
        let trimmed = trim_fraction(&fixed);
        match trimmed.split_once('.') {
            Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
            None => group_thousands(trimmed),
        }
    }

    /// Collapse entry text to exponent notation once it has too many digits.
    ///
    /// Only ASCII digits count; signs, decimal points and thousands
    /// separators are ignored both when counting and when re-parsing.
    pub fn clamp_length(&self, text: &str) -> String {
        let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
        if digits <= self.max_digits {
            return text.to_string();
        }
        let plain: String = text.chars().filter(|c| *c != ',').collect();
        to_exponential(parse_number(&plain), self.exponent_digits)
    }
}

/// [`NumberFormat::format`] with default limits.
pub fn format_number(value: f64) -> String {
    NumberFormat::default().format(value)
}

/// [`NumberFormat::clamp_length`] with default limits.
pub fn clamp_length(text: &str) -> String {
    NumberFormat::default().clamp_length(text)
}

/// Normalized scientific notation without a `+` on the exponent.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return INFINITY_TEXT.to_string();
    }
    format!("{value:.fraction_digits$e}")
}

/// Insert `,` between groups of three integer digits.
pub fn group_thousands(int_part: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn trim_fraction(fixed: &str) -> &str {
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.')
}
