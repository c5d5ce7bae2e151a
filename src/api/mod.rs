/// Controller API layer: wire types, the `Controller` seam, and its HTTP client.
pub mod errors;
pub mod http;
#[cfg(test)]
pub mod memory;
pub mod types;

pub use errors::ApiError;
pub use http::HttpController;
pub use types::{
    AnnotationSet, AppConfig, Build, ConfigUpdate, CreateBuildRequest, Page, Toleration,
    TolerationSet,
};

/// Operations the client needs from a Workflow controller.
///
/// The controller is the source of truth: `config_set` submits a partial
/// update and the controller merges it, deleting keys whose value is `null`.
/// Commands never merge locally; they re-read with `config_list` afterwards.
pub trait Controller {
    /// Read the config resource of `app`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn config_list(&self, app: &str) -> Result<AppConfig, ApiError>;

    /// Submit a partial config update for `app`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn config_set(&self, app: &str, update: &ConfigUpdate) -> Result<AppConfig, ApiError>;

    /// List at most `limit` builds of `app`, newest last.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn builds_list(&self, app: &str, limit: u32) -> Result<Page<Build>, ApiError>;

    /// Create a build of `app` from an image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn builds_create(&self, app: &str, request: &CreateBuildRequest) -> Result<Build, ApiError>;
}

impl<C: Controller + ?Sized> Controller for &C {
    fn config_list(&self, app: &str) -> Result<AppConfig, ApiError> {
        (**self).config_list(app)
    }

    fn config_set(&self, app: &str, update: &ConfigUpdate) -> Result<AppConfig, ApiError> {
        (**self).config_set(app, update)
    }

    fn builds_list(&self, app: &str, limit: u32) -> Result<Page<Build>, ApiError> {
        (**self).builds_list(app, limit)
    }

    fn builds_create(&self, app: &str, request: &CreateBuildRequest) -> Result<Build, ApiError> {
        (**self).builds_create(app, request)
    }
}
