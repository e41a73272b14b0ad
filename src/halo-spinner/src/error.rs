//! Spinner error types.

use thiserror::Error;

/// Errors raised while configuring or setting up a spinner.
///
/// Runtime animation never fails; the only recoverable errors are
/// configuration problems detected before any layer is created.
#[derive(Error, Debug)]
pub enum SpinnerError {
    /// A configuration value makes the geometry or color cycle undefined.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration {
        field: &'static str,
        message: String,
    },

    /// The configuration document could not be decoded.
    #[error("Failed to parse spinner configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl SpinnerError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }

    /// Returns the offending field name for configuration errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(*field),
            Self::Parse(_) => None,
        }
    }
}

/// Result type alias using [`SpinnerError`].
pub type Result<T> = std::result::Result<T, SpinnerError>;
