/// Structured error envelope written to stderr under `--json`.
use serde::{Deserialize, Serialize};

use crate::errors::CliError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The offending token, for `key=value` format errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl ErrorOutput {
    /// Construct from a `CliError`.
    #[must_use]
    pub fn from_cli_error(err: &CliError) -> Self {
        let line = match err {
            CliError::Parse(crate::parse::ParseError::Format { line }) => Some(line.clone()),
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                line,
            },
        }
    }
}
