/// Top-level errors surfaced by commands.
use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::parse::ParseError;
use crate::settings::ConfigError;

/// Everything a command can fail with. Nothing is recovered locally: errors
/// travel unchanged to `main`, which prints them and exits non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed user input (`key=value` tokens, manifests).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `toleration:set` without the identifier argument.
    #[error("A toleration identifier is required, e.g. 'deis toleration:set gpu --key=dedicated'")]
    TolerationIdentifierMissing,

    /// Invalid per-command arguments.
    #[error("{}", usage_message(.0))]
    Usage(#[from] clap::Error),

    /// No `-a` given and no `deis` git remote to infer the app from.
    #[error("No app specified. Use -a <app> or run from a directory with a 'deis' git remote")]
    AppNotSpecified,

    /// A manifest file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Client profile problems.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The controller call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) | Self::TolerationIdentifierMissing | Self::Usage(_) => 2,
            Self::AppNotSpecified | Self::Config(_) => 3,
            Self::Api(api) => api.exit_code(),
            Self::ReadManifest { .. } | Self::Io(_) => 1,
        }
    }

    /// Machine-readable error code (`snake_case`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::Format { .. }) => "format_error",
            Self::Parse(ParseError::Manifest { .. }) | Self::ReadManifest { .. } => {
                "manifest_error"
            }
            Self::TolerationIdentifierMissing => "toleration_identifier_missing",
            Self::Usage(_) => "usage",
            Self::AppNotSpecified => "app_not_specified",
            Self::Config(ConfigError::NotLoggedIn { .. }) => "not_logged_in",
            Self::Config(_) => "config_error",
            Self::Api(api) => api.code(),
            Self::Io(_) => "io_error",
        }
    }
}

/// clap's rendered error without its own `error: ` lead, which `main`
/// already supplies.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    rendered
        .strip_prefix("error: ")
        .unwrap_or(&rendered)
        .to_owned()
}
