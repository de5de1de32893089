//! Error types for netdiag

use serde::Serialize;
use thiserror::Error;

/// Main error type for netdiag
#[derive(Debug, Error)]
pub enum NdError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("command timed out after {timeout_secs}s on {namespace}/{pod}")]
    ExecTimeout {
        timeout_secs: u64,
        namespace: String,
        pod: String,
    },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NdError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            NdError::Kube(_) => "K8S_ERROR",
            NdError::Validation(_) => "VALIDATION_ERROR",
            NdError::NotFound(_) => "NOT_FOUND",
            NdError::ExecTimeout { .. } => "TIMEOUT",
            NdError::Transport(_) => "TRANSPORT_ERROR",
            NdError::Parse(_) => "PARSE_ERROR",
            NdError::Config(_) => "CONFIG_ERROR",
            NdError::Io(_) => "IO_ERROR",
            NdError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Structured body for serializing failures to callers.
    pub fn to_wire(&self) -> ErrorBody {
        ErrorBody {
            error: true,
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<serde_json::Error> for NdError {
    fn from(e: serde_json::Error) -> Self {
        NdError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for NdError {
    fn from(e: serde_yaml::Error) -> Self {
        NdError::Serialization(e.to_string())
    }
}

/// Wire shape for reported failures
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub code: &'static str,
    pub message: String,
}

/// Result type alias for netdiag
pub type Result<T> = std::result::Result<T, NdError>;
