//! Builder API for session construction.

pub mod error;
pub mod session;

pub use error::BuildError;
pub use session::SessionBuilder;
