//! The textual entry buffer.
//!
//! The buffer is both what the user is typing (`"3."`, `"-0.05"`) and the
//! numeric source for every operation. All numeric reads go through
//! [`Entry::value`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text stored in place of a number after a failed computation.
pub const ERROR_TEXT: &str = "Not a number";

/// The entry buffer of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Default for Entry {
    fn default() -> Self {
        Self::zero()
    }
}

impl Entry {
    /// The `"0"` entry.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// The failure sentinel.
    pub fn error() -> Self {
        Self(ERROR_TEXT.to_string())
    }

    /// Wrap raw text without checking it.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Store a computed value; NaN becomes the sentinel.
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() {
            Self::error()
        } else {
            Self(number_to_text(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the buffer, NaN if it does not parse.
    pub fn value(&self) -> f64 {
        parse_number(&self.0)
    }

    pub fn is_zero_text(&self) -> bool {
        self.0 == "0"
    }

    pub fn is_error(&self) -> bool {
        self.value().is_nan()
    }

    pub fn has_dot(&self) -> bool {
        self.0.contains('.')
    }

    /// Whether the text is in exponent notation, e.g. `"1e-15"`.
    pub fn is_exponent(&self) -> bool {
        self.0.contains(['e', 'E'])
    }

    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }

    /// Length with the first minus sign and first decimal point removed.
    pub fn digit_len(&self) -> usize {
        let mut len = self.0.chars().count();
        if self.0.contains('-') {
            len -= 1;
        }
        if self.0.contains('.') {
            len -= 1;
        }
        len
    }

    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Prepend or remove the leading minus sign.
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.0.strip_prefix('-') {
            self.0 = rest.to_string();
        } else {
            self.0.insert(0, '-');
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse text as a numeric literal.
///
/// Empty text is zero, a bare leading or trailing dot is accepted and
/// `Infinity` is recognised. Everything else that does not parse is NaN.
///
/// # Example
///
/// ```rust
/// use tapecalc::core::parse_number;
///
/// assert_eq!(parse_number("3."), 3.0);
/// assert_eq!(parse_number(".5"), 0.5);
/// assert!(parse_number("Not a number").is_nan());
/// ```
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let literal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !literal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Shortest round-trip text for a number.
///
/// Plain decimal notation is used for magnitudes in `[1e-6, 1e21)`,
/// exponent notation (`1e+21`, `1.5e-7`) outside it.
pub fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e3".
    let repr = format!("{:e}", value.abs());
    let (mantissa, exponent) = match repr.split_once('e') {
        Some(parts) => parts,
        None => return repr,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", (n - 1).abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", (n - 1).abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
