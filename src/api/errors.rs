/// Errors from the controller API layer.
use thiserror::Error;

/// Typed errors returned by a [`Controller`](super::Controller).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The controller rejected the token (HTTP 401).
    #[error("Unauthorized: the controller rejected your credentials. Try 'deis login' again")]
    Unauthorized,

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// Path of the resource that was requested.
        resource: String,
    },

    /// Any other non-success status.
    #[error("Controller returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// Connection, TLS, or timeout failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with a body we could not decode.
    #[error("Invalid response from controller: {0}")]
    Decode(#[from] serde_json::Error),

    /// An annotation value that is not a string.
    #[error("Annotation '{key}' of process type '{proc_type}' is not a string")]
    NonStringAnnotation {
        /// Process type the annotation belongs to.
        proc_type: String,
        /// Annotation key.
        key: String,
    },
}

impl ApiError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unauthorized => 3,
            Self::NotFound { .. } => 4,
            _ => 1,
        }
    }

    /// Machine-readable code used in the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Status { .. } => "api_error",
            Self::Transport(_) => "network_error",
            Self::Decode(_) | Self::NonStringAnnotation { .. } => "invalid_response",
        }
    }
}
