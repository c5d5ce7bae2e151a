/// Input parsing: `key=value` tokens and build manifests.
pub mod kv;
pub mod manifest;

pub use kv::parse_key_values;
pub use manifest::{parse_procfile, parse_sidecarfile};

use thiserror::Error;

/// Errors raised while parsing user input, before anything is sent.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token that is neither a comment nor a `key=value` pair.
    #[error("'{line}' does not match the pattern 'key=var', ex: MODE=test")]
    Format {
        /// The offending token, verbatim.
        line: String,
    },

    /// A Procfile or Sidecarfile that is not the expected YAML map.
    #[error("Invalid {kind}: {source}")]
    Manifest {
        /// `Procfile` or `Sidecarfile`.
        kind: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}
