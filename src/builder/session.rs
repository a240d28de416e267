//! Builder for constructing sessions.

use crate::builder::error::BuildError;
use crate::config::Config;
use crate::session::Session;

/// Builder for constructing a [`Session`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use tapecalc::SessionBuilder;
///
/// let session = SessionBuilder::new().max_digits(10).build().unwrap();
/// assert_eq!(session.config().max_digits, 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    config: Config,
    memory: f64,
}

impl SessionBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the entry length cap.
    pub fn max_digits(mut self, n: usize) -> Self {
        self.config.max_digits = n;
        self
    }

    /// Set the working precision of arithmetic results.
    pub fn significant_digits(mut self, n: usize) -> Self {
        self.config.significant_digits = n;
        self
    }

    /// Set the text shown for failed results.
    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.config.error_text = text.into();
        self
    }

    /// Start with a value already in the memory register.
    pub fn memory(mut self, value: f64) -> Self {
        self.memory = value;
        self
    }

    /// Build the session.
    /// Returns every configuration violation if the config is invalid.
    pub fn build(self) -> Result<Session, BuildError> {
        let config = self.config.into_validated()?;
        let mut session = Session::with_config(config);
        session.set_memory(self.memory);
        Ok(session)
    }
}
