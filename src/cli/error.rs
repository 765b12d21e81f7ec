//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Application(e) => match e {
                ApplicationError::DocumentLoad { .. } => exitcode::DATAERR,
                ApplicationError::Staging { .. } => exitcode::CANTCREAT,
                ApplicationError::ToolNotFound { .. } => exitcode::UNAVAILABLE,
                ApplicationError::ToolExecutionFailed { .. } => exitcode::SOFTWARE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
            },
        }
    }
}
