//! The mutable shell around the pure core.
//!
//! A [`Session`] owns all calculator state and consumes [`Action`]s one at a
//! time. Each dispatch runs to completion; sharing a session across threads
//! needs a single exclusive lock around it.

mod action;
mod machine;
mod render;

pub use action::{Action, ActionError};
pub use machine::{Outcome, Session};
pub use render::Render;
