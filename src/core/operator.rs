//! The arithmetic engine: one binary operation per call.

use super::precision::{normalize, normalize_to};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A pending binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

/// A symbol that does not name an operator.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown operator '{symbol}', expected one of + - * /")]
pub struct ParseOperatorError {
    pub symbol: String,
}

impl Operator {
    /// The symbol used in history and tape text.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Apply the operator at the default working precision.
    ///
    /// Both operands are normalized first, then the raw result. Division by
    /// zero yields NaN; nothing else fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tapecalc::core::Operator;
    ///
    /// assert_eq!(Operator::Add.apply(0.1, 0.2), 0.3);
    /// assert!(Operator::Divide.apply(5.0, 0.0).is_nan());
    /// ```
    pub fn apply(self, a: f64, b: f64) -> f64 {
        let (x, y) = (normalize(a), normalize(b));
        match self {
            Self::Add => normalize(x + y),
            Self::Subtract => normalize(x - y),
            Self::Multiply => normalize(x * y),
            Self::Divide if y == 0.0 => f64::NAN,
            Self::Divide => normalize(x / y),
        }
    }

    /// Apply the operator rounding to `digits` significant digits.
    pub fn apply_with(self, a: f64, b: f64, digits: usize) -> f64 {
        let (x, y) = (normalize_to(a, digits), normalize_to(b, digits));
        let raw = match self {
            Self::Add => x + y,
            Self::Subtract => x - y,
            Self::Multiply => x * y,
            Self::Divide if y == 0.0 => return f64::NAN,
            Self::Divide => x / y,
        };
        normalize_to(raw, digits)
    }
}

/// Free-function form of [`Operator::apply`].
pub fn apply(operator: Operator, a: f64, b: f64) -> f64 {
    operator.apply(a, b)
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = ParseOperatorError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(ParseOperatorError {
                symbol: other.to_string(),
            }),
        }
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(ParseOperatorError {
                symbol: s.to_string(),
            }),
        }
    }
}
