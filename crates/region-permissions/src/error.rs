//! Error types for the permission engine
//!
//! Permission predicates never fail: every error here is either produced by a
//! collaborator and converted into a conservative "deny", or produced by the
//! configuration and operator-command surfaces, which log and carry on.

use thiserror::Error;

/// Errors returned by the identity profile lookup.
///
/// The engine treats every variant as "not an administrator".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The lookup did not complete within its timeout
    #[error("Profile lookup timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The user service could not be reached
    #[error("User service unavailable: {0}")]
    Unavailable(String),

    /// Internal error in the user service
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for profile lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Startup configuration errors.
///
/// These never abort startup; the loader logs them and keeps the default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("{value} is not a valid {key} value")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// The rejected raw value.
        value: String,
    },
}

/// Operator console command errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Not a permissions command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// Command given without its boolean argument
    #[error("Missing argument for '{0}'")]
    MissingArgument(String),

    /// Argument is not a boolean
    #[error("Invalid argument for '{command}': {value}")]
    InvalidArgument {
        /// Command name.
        command: String,
        /// The rejected argument.
        value: String,
    },
}

impl CommandError {
    /// Get error code for console responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CommandError::Unknown(_) => "UNKNOWN_COMMAND",
            CommandError::MissingArgument(_) => "MISSING_ARGUMENT",
            CommandError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }
}
