//! Crate-level error types for application startup and shutdown.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that abort the desktop application before or after the UI runs.
#[derive(Error, Debug)]
pub enum SupportError {
    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging could not be initialized
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// The backend client could not be constructed
    #[error("Backend client error: {0}")]
    Api(#[from] ApiError),

    /// Any other failure with context attached
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SupportError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }
}

pub type SupportResult<T> = Result<T, SupportError>;
