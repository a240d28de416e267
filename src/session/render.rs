//! Output handed to a display surface after each action.

use serde::{Deserialize, Serialize};

/// Everything a display surface needs to draw a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Render {
    /// Formatted entry, or the error text
    pub display_text: String,
    /// `"<previous> <operator>"` while an operation is pending, else empty
    pub history_text: String,
    /// Tape entry texts, oldest first
    pub tape_entries: Vec<String>,
    /// Whether the tape panel is shown
    pub tape_visible: bool,
}
