//! Pure calculator core.
//!
//! This module contains everything that does not own a session:
//! - Precision normalization and the arithmetic engine
//! - Display formatting of numbers and entry text
//! - The entry buffer with its single numeric accessor
//! - Session modes via the `State` trait
//! - The tape of completed operations
//!
//! All functions here are pure apart from the timestamp taken when a tape
//! entry is created.

mod entry;
mod format;
mod operator;
mod precision;
mod state;
mod tape;

pub use entry::{number_to_text, parse_number, Entry, ERROR_TEXT};
pub use format::{
    clamp_length, format_number, group_thousands, to_exponential, NumberFormat, INFINITY_TEXT,
    LOWER_FIXED_LIMIT, UPPER_FIXED_LIMIT,
};
pub use operator::{apply, Operator, ParseOperatorError};
pub use precision::{normalize, normalize_to, SIGNIFICANT_DIGITS};
pub use state::{Mode, State};
pub use tape::{Tape, TapeEntry};
