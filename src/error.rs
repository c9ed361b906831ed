//! Error types for configuration and registry operations.

use crate::models::DecoderType;
use crate::registry::Handle;
use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced synchronously by configuration setters and registry lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input (negative length, inverted range, unknown id, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The symbology does not carry the requested parameter
    #[error("{decoder} has no '{parameter}' parameter")]
    UnsupportedParameter {
        /// Symbology the caller addressed
        decoder: DecoderType,
        /// Parameter name
        parameter: &'static str,
    },

    /// Handle is unknown or its configuration was released
    #[error("No configuration registered for handle {0}")]
    HandleNotFound(Handle),

    /// Worker pool could not be built from the global options
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
