//! Application-level errors for the generation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the pipeline stages. Each variant names the stage
/// that failed; the selector and editor cannot fail by construction.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("failed to load robot description {path}: {source}")]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to stage document: {context}")]
    Staging {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("flattening tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("flattening tool {tool} failed: {stderr}")]
    ToolExecutionFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
