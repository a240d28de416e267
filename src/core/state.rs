//! Coarse session modes.
//!
//! A session is fully described by its entry buffer, pending operand,
//! pending operator and overwrite flag. [`Mode`] summarises those fields
//! into a named state for logging and inspection.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for named states.
///
/// All methods are pure - no side effects.
///
/// # Example
///
/// ```rust
/// use tapecalc::core::{Mode, State};
///
/// assert_eq!(Mode::Entering.name(), "Entering");
/// assert!(Mode::Error.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Where a session currently stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Mode {
    /// Typing a number with no operator pending.
    Entering,
    /// An operator is pending and the entry is the left operand.
    AwaitingOperand,
    /// An operator is pending and a right operand is being typed.
    Chaining,
    /// A result is shown; the next digit starts a new entry.
    Showing,
    /// The entry holds the failure sentinel.
    Error,
}

impl State for Mode {
    fn name(&self) -> &str {
        match self {
            Self::Entering => "Entering",
            Self::AwaitingOperand => "AwaitingOperand",
            Self::Chaining => "Chaining",
            Self::Showing => "Showing",
            Self::Error => "Error",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl Mode {
    /// Derive the mode from session fields.
    pub fn classify(entry_is_error: bool, operator_pending: bool, overwrite: bool) -> Self {
        match (entry_is_error, operator_pending, overwrite) {
            (true, _, _) => Self::Error,
            (false, true, true) => Self::AwaitingOperand,
            (false, true, false) => Self::Chaining,
            (false, false, true) => Self::Showing,
            (false, false, false) => Self::Entering,
        }
    }
}
