//! Tapecalc: a calculator session as a pure state machine
//!
//! Tapecalc models an interactive four-function calculator without any
//! rendering or input capture. A [`Session`] consumes named [`Action`]s
//! (digits, operators, unary functions, memory keys) and reduces them to a
//! consistent entry / pending operand / pending operator / overwrite state.
//! After each action the session renders a display string, a history string
//! and the tape of completed operations.
//!
//! # Core Concepts
//!
//! - **Entry**: the textual buffer being typed, also the numeric source
//! - **Arithmetic engine**: one binary operation at 15 significant digits
//! - **Formatting**: bounded-length display text with thousands separators
//! - **Tape**: append-only log of completed operations
//!
//! Failures never escape as errors: a failed computation stores the text
//! `"Not a number"` in the entry and flows through later operations until
//! the entry is replaced.
//!
//! # Example
//!
//! ```rust
//! use tapecalc::{Action, Session};
//!
//! let mut session = Session::new();
//! for key in ["5", "0", "/", "0", "Enter"] {
//!     if let Some(action) = Action::from_key(key) {
//!         session.dispatch(action);
//!     }
//! }
//!
//! let render = session.render();
//! assert_eq!(render.display_text, "Not a number");
//! assert!(render.tape_entries.is_empty());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    apply, clamp_length, format_number, normalize, Entry, Mode, Operator, Tape,
};
pub use builder::{BuildError, SessionBuilder};
pub use config::{Config, ConfigError};
pub use session::{Action, ActionError, Outcome, Render, Session};
