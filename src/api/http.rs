/// Blocking HTTP implementation of [`Controller`] on top of reqwest.
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use super::{ApiError, AppConfig, Build, ConfigUpdate, Controller, CreateBuildRequest, Page};
use crate::settings::Settings;

/// Controller API version this client was written against.
pub const API_VERSION: &str = "2.3";

/// Response header carrying the controller's API version.
const API_VERSION_HEADER: &str = "deis_api_version";

const USER_AGENT: &str = concat!("Deis Client v", env!("CARGO_PKG_VERSION"));

/// Talks to a real controller over HTTP(S).
pub struct HttpController {
    client: Client,
    base: String,
    token: String,
}

impl HttpController {
    /// Build a client for the controller named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialised.
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        Ok(Self::with_client(settings, client_builder(settings).build()?))
    }

    fn with_client(settings: &Settings, client: Client) -> Self {
        Self {
            client,
            base: settings.controller.trim_end_matches('/').to_owned(),
            token: settings.token.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base);
        tracing::debug!(%method, %url, "controller request");
        let req = self.client.request(method, url);
        if self.token.is_empty() {
            req
        } else {
            req.header(AUTHORIZATION, format!("token {}", self.token))
        }
    }

    fn send<T: DeserializeOwned>(&self, req: RequestBuilder, path: &str) -> Result<T, ApiError> {
        let resp = req.send()?;
        let server_version = resp
            .headers()
            .get(API_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        check_api_version(server_version.as_deref());

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), path, "controller response");
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(status_error(status, path, body));
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Controller for HttpController {
    fn config_list(&self, app: &str) -> Result<AppConfig, ApiError> {
        let path = config_path(app);
        self.send(self.request(Method::GET, &path), &path)
    }

    fn config_set(&self, app: &str, update: &ConfigUpdate) -> Result<AppConfig, ApiError> {
        let path = config_path(app);
        self.send(self.request(Method::POST, &path).json(update), &path)
    }

    fn builds_list(&self, app: &str, limit: u32) -> Result<Page<Build>, ApiError> {
        let path = builds_path(app);
        let req = self
            .request(Method::GET, &path)
            .query(&[("limit", limit.to_string())]);
        self.send(req, &path)
    }

    fn builds_create(&self, app: &str, request: &CreateBuildRequest) -> Result<Build, ApiError> {
        let path = builds_path(app);
        self.send(self.request(Method::POST, &path).json(request), &path)
    }
}

fn client_builder(settings: &Settings) -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(!settings.ssl_verify)
}

fn config_path(app: &str) -> String {
    format!("/v2/apps/{app}/config/")
}

fn builds_path(app: &str) -> String {
    format!("/v2/apps/{app}/builds/")
}

/// Map a non-success status to a typed error.
fn status_error(status: StatusCode, resource: &str, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound {
            resource: resource.to_owned(),
        },
        _ => ApiError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

/// Warn when the controller speaks a different API version. Returns whether
/// the versions match; a controller that sends no version is assumed to.
fn check_api_version(server: Option<&str>) -> bool {
    match server {
        Some(server) if server != API_VERSION => {
            tracing::warn!(
                client = API_VERSION,
                server,
                "client and server API versions do not match, please consider upgrading"
            );
            false
        }
        _ => true,
    }
}
