//! Layered error definitions
//!
//! Categorized by source: config / event / verification / output

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Event Errors =====
    /// Action string does not name a known action
    #[error("unknown action: {action}")]
    UnknownAction { action: String },

    /// Inbound event could not be decoded
    #[error("event decode error: {message}")]
    EventDecode { message: String },

    // ===== Verification Errors =====
    /// Verifier could not produce a status
    #[error("verification failed for event '{corr_id}': {message}")]
    Verification { corr_id: String, message: String },

    // ===== Output Errors =====
    /// Output write error
    #[error("output '{output_name}' write error: {message}")]
    OutputWrite {
        output_name: String,
        message: String,
    },

    /// Output connection error
    #[error("output '{output_name}' connection error: {message}")]
    OutputConnection {
        output_name: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unknown action error
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Create verification error
    pub fn verification(corr_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Verification {
            corr_id: corr_id.into(),
            message: message.into(),
        }
    }

    /// Create output write error
    pub fn output_write(output_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            output_name: output_name.into(),
            message: message.into(),
        }
    }
}
