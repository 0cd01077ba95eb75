//! CLI Error Types

use mc_core::MetricError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Draft rejected by validation
    #[error("Metric draft rejected: {}", join_errors(.errors))]
    ValidationError { errors: Vec<MetricError> },

    /// Core error
    #[error("{0}")]
    CoreError(#[from] MetricError),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

fn join_errors(errors: &[MetricError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigError { .. } => 1,
            CliError::InvalidArgument { .. } => 2,
            CliError::ValidationError { .. } => 3,
            CliError::CoreError(MetricError::MetricNotFound { .. }) => 4,
            CliError::CoreError(e) if e.code().starts_with("MC-CONFIG") => 1,
            CliError::CoreError(e) if e.is_persistence() => 5,
            CliError::CoreError(_) => 10,
            CliError::JsonError(_) => 6,
        }
    }
}
