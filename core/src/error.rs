//! Error handling for the Seaweed Trade Platform
//!
//! The error surface is deliberately small. Grading failures are caught at
//! the client boundary and turned into a fallback outcome, and invalid
//! lifecycle transitions are silent no-ops, so errors here are limited to
//! input validation, Oracle transport internals, and configuration.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal to the grading client; never escapes its public methods
    #[error("Grading oracle error: {0}")]
    Oracle(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Oracle(_) => "ORACLE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for trade-core operations
pub type AppResult<T> = Result<T, AppError>;
