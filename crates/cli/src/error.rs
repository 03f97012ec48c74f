//! Error types for padctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device rejected: {0}")]
    Rejected(#[from] openpad_errors::GamepadError),

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{family} does not support {operation} over {link}")]
    Unsupported {
        family: String,
        operation: &'static str,
        link: String,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
