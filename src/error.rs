//! Error types for the Ferie Engine.
//!
//! The entitlement calculator itself never fails; these errors cover
//! configuration loading, the worker store and the registry built on it.

use thiserror::Error;

/// The main error type for the Ferie Engine.
///
/// # Example
///
/// ```
/// use ferie_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The profile has no entry in the profile catalogue.
    #[error("Profile not found: {profile}")]
    ProfileNotFound {
        /// The profile tag that was requested.
        profile: String,
    },

    /// No worker exists with the given id.
    #[error("Worker not found: {id}")]
    WorkerNotFound {
        /// The requested worker id.
        id: u64,
    },

    /// A worker record was rejected.
    #[error("Invalid worker field '{field}': {message}")]
    InvalidWorker {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The backing store could not be read or written.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::StoreError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::StoreError {
            message: format!("invalid worker document: {}", error),
        }
    }
}
