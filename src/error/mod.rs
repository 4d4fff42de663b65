//! Error types for collection manager client operations

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The collection manager socket could not be reached
    #[error("Failed to connect to collection manager at {}", .path.display())]
    Transport {
        path: PathBuf,
        #[source]
        source: tonic::transport::Error,
    },

    /// The collection manager answered with a gRPC error status
    #[error("Collection manager returned {}: {}", .0.code(), .0.message())]
    Rpc(#[from] tonic::Status),

    /// The local credential store or a credential helper failed
    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Invalid reference {reference}: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Invalid attributes: {0}")]
    InvalidAttributes(String),

    /// Collection configuration file errors
    #[error("Config error at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid_reference(reference: &str, reason: impl Into<String>) -> Self {
        ClientError::InvalidReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ClientError::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
