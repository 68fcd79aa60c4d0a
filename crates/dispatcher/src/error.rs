//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Action string outside the known set (policy = fail)
    #[error("unknown action '{action}'")]
    UnknownAction { action: String },

    /// Verifier could not decide
    #[error("verification failed: {0}")]
    Verification(#[source] contracts::ContractError),

    /// Output creation error
    #[error("failed to create output '{name}': {message}")]
    OutputCreation { name: String, message: String },

    /// Invalid probe configuration
    #[error("invalid health probe configuration: {message}")]
    ProbeConfig { message: String },

    /// Contract error
    #[error("contract error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Create an output creation error
    pub fn output_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OutputCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a probe configuration error
    pub fn probe_config(message: impl Into<String>) -> Self {
        Self::ProbeConfig {
            message: message.into(),
        }
    }
}
