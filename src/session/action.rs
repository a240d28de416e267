//! Input actions consumed by a session.
//!
//! An external dispatcher turns a key press or button activation into one
//! [`Action`]; [`Action::from_key`] and [`Action::from_button`] cover the
//! usual keyboard layout and button names.

use crate::core::{Operator, ParseOperatorError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum Action {
    /// A digit 0-9
    Digit(u8),
    Dot,
    ClearEntry,
    Operator(Operator),
    Equals,
    Clear,
    Sign,
    Percent,
    Backspace,
    Sqrt,
    Square,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    TapeClear,
    ToggleTapeVisible,
}

/// Errors mapping a button description to an action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Action '{action}' requires a value")]
    MissingValue { action: &'static str },

    #[error("Invalid digit '{0}', expected 0-9")]
    InvalidDigit(String),

    #[error(transparent)]
    InvalidOperator(#[from] ParseOperatorError),
}

impl Action {
    /// Build a digit action, rejecting anything above 9.
    pub fn digit(d: u8) -> Result<Self, ActionError> {
        if d <= 9 {
            Ok(Self::Digit(d))
        } else {
            Err(ActionError::InvalidDigit(d.to_string()))
        }
    }

    /// Map a keyboard key name to an action.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tapecalc::{Action, Operator};
    ///
    /// assert_eq!(Action::from_key("7"), Some(Action::Digit(7)));
    /// assert_eq!(Action::from_key("*"), Some(Action::Operator(Operator::Multiply)));
    /// assert_eq!(Action::from_key("Enter"), Some(Action::Equals));
    /// assert_eq!(Action::from_key("F1"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(d) = c.to_digit(10) {
                return Some(Self::Digit(d as u8));
            }
            if let Ok(op) = Operator::try_from(c) {
                return Some(Self::Operator(op));
            }
        }
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            "%" => Some(Self::Percent),
            "." => Some(Self::Dot),
            "r" => Some(Self::Sqrt),
            "s" => Some(Self::Square),
            _ => None,
        }
    }

    /// Map a button's action name and optional value to an action.
    pub fn from_button(action: &str, value: Option<&str>) -> Result<Self, ActionError> {
        let action = match action {
            "digit" => {
                let raw = value.ok_or(ActionError::MissingValue { action: "digit" })?;
                let d = raw
                    .parse::<u8>()
                    .map_err(|_| ActionError::InvalidDigit(raw.to_string()))?;
                return Self::digit(d);
            }
            "operator" => {
                let raw = value.ok_or(ActionError::MissingValue { action: "operator" })?;
                Self::Operator(raw.parse()?)
            }
            "dot" => Self::Dot,
            "ce" => Self::ClearEntry,
            "equals" => Self::Equals,
            "clear" => Self::Clear,
            "sign" => Self::Sign,
            "percent" => Self::Percent,
            "backspace" => Self::Backspace,
            "sqrt" => Self::Sqrt,
            "square" => Self::Square,
            "mc" => Self::MemoryClear,
            "mr" => Self::MemoryRecall,
            "mplus" => Self::MemoryAdd,
            "mminus" => Self::MemorySubtract,
            "tapeClear" => Self::TapeClear,
            "toggleHistoryVisible" => Self::ToggleTapeVisible,
            other => return Err(ActionError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::Dot => "dot",
            Self::ClearEntry => "ce",
            Self::Operator(_) => "operator",
            Self::Equals => "equals",
            Self::Clear => "clear",
            Self::Sign => "sign",
            Self::Percent => "percent",
            Self::Backspace => "backspace",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::MemoryClear => "mc",
            Self::MemoryRecall => "mr",
            Self::MemoryAdd => "mplus",
            Self::MemorySubtract => "mminus",
            Self::TapeClear => "tapeClear",
            Self::ToggleTapeVisible => "toggleHistoryVisible",
        }
    }
}
