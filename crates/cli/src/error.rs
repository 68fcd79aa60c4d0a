//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration loading or validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    /// The downstream application did not answer the health probe
    #[error("Health check failed for component '{component}'")]
    Unhealthy { component: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn unhealthy(component: impl Into<String>) -> Self {
        Self::Unhealthy {
            component: component.into(),
        }
    }
}
