//! Tunable limits for a calculator session.
//!
//! Validation uses Stillwater's `Validation` type so that every violated
//! rule is reported in a single pass.

use crate::core::{parse_number, NumberFormat, ERROR_TEXT, SIGNIFICANT_DIGITS};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Largest digit count an `f64` can represent faithfully.
const MAX_F64_DIGITS: usize = 17;

/// A configuration rule that does not hold.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_digits must be between 1 and {max} (got {value})")]
    MaxDigitsOutOfRange { value: usize, max: usize },

    #[error("{field} must be between 1 and {max} (got {value})")]
    SignificantDigitsOutOfRange {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("{field} must be at most {max} (got {value})")]
    FractionDigitsOutOfRange {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("error_text must not be empty")]
    EmptyErrorText,

    #[error("error_text '{0}' reads as a number")]
    NumericErrorText(String),
}

/// Session limits.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Example
///
/// ```rust
/// use tapecalc::Config;
///
/// let config = Config::from_json(r#"{ "max_digits": 10 }"#).unwrap();
/// assert_eq!(config.max_digits, 10);
/// assert_eq!(config.significant_digits, 15);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digits an entry may hold before input stops and display collapses
    pub max_digits: usize,

    /// Significant digits kept by arithmetic results
    pub significant_digits: usize,

    /// Fractional digits computed for fixed-point display
    pub fraction_digits: usize,

    /// Fractional digits in exponent notation
    pub exponent_digits: usize,

    /// Significant digits kept by square root
    pub sqrt_significant_digits: usize,

    /// Text shown in place of a failed result
    pub error_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_digits: 14,
            significant_digits: SIGNIFICANT_DIGITS,
            fraction_digits: 12,
            exponent_digits: 6,
            sqrt_significant_digits: 7,
            error_text: ERROR_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, crate::builder::BuildError> {
        let config: Config = serde_json::from_str(json)?;
        config.into_validated()
    }

    /// Validate, converting failures into a [`crate::builder::BuildError`].
    pub fn into_validated(self) -> Result<Self, crate::builder::BuildError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(errors) => Err(crate::builder::BuildError::InvalidConfig {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            check(
                (1..=MAX_F64_DIGITS).contains(&self.max_digits),
                ConfigError::MaxDigitsOutOfRange {
                    value: self.max_digits,
                    max: MAX_F64_DIGITS,
                },
            ),
            check_significant("significant_digits", self.significant_digits),
            check_significant("sqrt_significant_digits", self.sqrt_significant_digits),
            check_fraction("fraction_digits", self.fraction_digits, 20),
            check_fraction("exponent_digits", self.exponent_digits, 16),
            check(!self.error_text.is_empty(), ConfigError::EmptyErrorText),
            check(
                self.error_text.is_empty() || parse_number(&self.error_text).is_nan(),
                ConfigError::NumericErrorText(self.error_text.clone()),
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Display limits derived from this configuration.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            max_digits: self.max_digits,
            fraction_digits: self.fraction_digits,
            exponent_digits: self.exponent_digits,
        }
    }
}

fn check(ok: bool, error: ConfigError) -> Validation<(), NonEmptyVec<ConfigError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error)
    }
}

fn check_significant(
    field: &'static str,
    value: usize,
) -> Validation<(), NonEmptyVec<ConfigError>> {
    check(
        (1..=MAX_F64_DIGITS).contains(&value),
        ConfigError::SignificantDigitsOutOfRange {
            field,
            value,
            max: MAX_F64_DIGITS,
        },
    )
}

fn check_fraction(
    field: &'static str,
    value: usize,
    max: usize,
) -> Validation<(), NonEmptyVec<ConfigError>> {
    check(
        value <= max,
        ConfigError::FractionDigitsOutOfRange { field, value, max },
    )
}
