//! Client profile and app name resolution.
//!
//! A profile is the JSON file written by `deis login`, stored as
//! `~/.deis/<name>.json`. The name comes from `--config`, then
//! `$DEIS_PROFILE`, then defaults to `client`. `--config` may also be a path.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile used when neither `--config` nor `$DEIS_PROFILE` is given.
pub const DEFAULT_PROFILE: &str = "client";

/// Page size used when the profile does not set `response_limit`.
pub const DEFAULT_LIMIT: u32 = 100;

/// Environment variable naming the active profile.
pub const PROFILE_ENV: &str = "DEIS_PROFILE";

/// Name of the git remote that points at the app on the builder.
const GIT_REMOTE: &str = "deis";

/// Errors while locating or reading a profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No profile file exists at the resolved location.
    #[error(
        "Client configuration file not found at {}. Are you logged in? Use 'deis login' or 'deis register' to get started",
        path.display()
    )]
    NotLoggedIn {
        /// Resolved profile path.
        path: PathBuf,
    },

    /// The home directory could not be determined.
    #[error("Cannot determine the home directory to locate the client profile")]
    NoHomeDir,

    /// The profile exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile is not valid JSON or lacks required fields.
    #[error("Malformed client configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of a client profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
    pub controller: String,
    #[serde(default)]
    pub token: String,
    /// Default page size for list commands; `0` means [`DEFAULT_LIMIT`].
    #[serde(default)]
    pub response_limit: u32,
}

fn default_ssl_verify() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: String::new(),
            ssl_verify: default_ssl_verify(),
            controller: String::new(),
            token: String::new(),
            response_limit: 0,
        }
    }
}

impl Settings {
    /// Load a profile from `path`.
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` if the file is missing, `Read` or `Parse` otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotLoggedIn {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded client profile");
        Ok(settings)
    }

    /// Effective page size for list commands.
    #[must_use]
    pub fn limit(&self) -> u32 {
        if self.response_limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.response_limit
        }
    }
}

/// Resolve the profile path from `--config`, the environment, and the home
/// directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` when a profile name has to be resolved but
/// no home directory is known.
pub fn profile_path(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    let env = std::env::var(PROFILE_ENV).ok();
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    resolve_profile_path(explicit, env.as_deref(), home.as_deref())
}

fn resolve_profile_path(
    explicit: Option<&str>,
    env: Option<&str>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let name = explicit
        .or(env)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PROFILE);

    if name.contains(MAIN_SEPARATOR) || name.contains('/') || name.ends_with(".json") {
        return Ok(PathBuf::from(name));
    }

    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".deis").join(format!("{name}.json")))
}

/// App name inferred from the `deis` git remote of the current directory.
#[must_use]
pub fn detect_app() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", &format!("remote.{GIT_REMOTE}.url")])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!("no '{GIT_REMOTE}' git remote found");
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout);
    app_from_remote_url(url.trim())
}

/// Extract the app name from a builder remote such as
/// `ssh://git@deis-builder.example.com:2222/foo.git`.
#[must_use]
pub fn app_from_remote_url(url: &str) -> Option<String> {
    let last = url.trim_end_matches('/').rsplit(['/', ':']).next()?;
    let app = last.strip_suffix(".git").unwrap_or(last);
    if app.is_empty() {
        None
    } else {
        Some(app.to_owned())
    }
}
