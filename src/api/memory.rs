//! In-memory [`Controller`] for exercising commands without a network.
//!
//! Applies partial updates the way the real controller does: `Some` values
//! are merged in, `None` values delete their key, and process types left with
//! no entries disappear. Every submitted update is recorded so tests can
//! assert on the exact request body.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{
    ApiError, AppConfig, Build, ConfigUpdate, Controller, CreateBuildRequest, Page, Toleration,
};

#[derive(Default)]
pub struct MemoryController {
    config: RefCell<AppConfig>,
    builds: RefCell<Vec<Build>>,
    pub config_updates: RefCell<Vec<ConfigUpdate>>,
    pub build_requests: RefCell<Vec<CreateBuildRequest>>,
    /// When set, every call fails with `ApiError::Status` of this code.
    pub fail_with: Option<u16>,
}

impl MemoryController {
    pub fn with_annotations(app: &str, annotations: &[(&str, &str, &str)]) -> Self {
        let controller = Self::new(app);
        {
            let mut config = controller.config.borrow_mut();
            for (proc_type, key, value) in annotations {
                config
                    .annotations
                    .entry((*proc_type).to_owned())
                    .or_default()
                    .insert((*key).to_owned(), serde_json::Value::from(*value));
            }
        }
        controller
    }

    pub fn with_tolerations(app: &str, tolerations: &[(&str, &str, Toleration)]) -> Self {
        let controller = Self::new(app);
        {
            let mut config = controller.config.borrow_mut();
            for (proc_type, identifier, toleration) in tolerations {
                config
                    .tolerations
                    .entry((*proc_type).to_owned())
                    .or_default()
                    .insert((*identifier).to_owned(), toleration.clone());
            }
        }
        controller
    }

    pub fn with_builds(app: &str, builds: Vec<Build>) -> Self {
        let controller = Self::new(app);
        *controller.builds.borrow_mut() = builds;
        controller
    }

    pub fn new(app: &str) -> Self {
        let controller = Self::default();
        controller.config.borrow_mut().app = app.to_owned();
        controller
    }

    /// Insert a raw annotation value, bypassing the string-only API surface.
    pub fn insert_raw_annotation(&self, proc_type: &str, key: &str, value: serde_json::Value) {
        self.config
            .borrow_mut()
            .annotations
            .entry(proc_type.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }

    fn check(&self, app: &str) -> Result<(), ApiError> {
        if let Some(status) = self.fail_with {
            return Err(ApiError::Status {
                status,
                body: "injected failure".to_owned(),
            });
        }
        if app != self.config.borrow().app {
            return Err(ApiError::NotFound {
                resource: format!("/v2/apps/{app}/config/"),
            });
        }
        Ok(())
    }
}

fn merge<T: Clone>(
    target: &mut BTreeMap<String, BTreeMap<String, T>>,
    update: &BTreeMap<String, BTreeMap<String, Option<T>>>,
) {
    for (group, values) in update {
        let entry = target.entry(group.clone()).or_default();
        for (key, value) in values {
            match value {
                Some(v) => {
                    entry.insert(key.clone(), v.clone());
                }
                None => {
                    entry.remove(key);
                }
            }
        }
        if entry.is_empty() {
            target.remove(group);
        }
    }
}

impl Controller for MemoryController {
    fn config_list(&self, app: &str) -> Result<AppConfig, ApiError> {
        self.check(app)?;
        Ok(self.config.borrow().clone())
    }

    fn config_set(&self, app: &str, update: &ConfigUpdate) -> Result<AppConfig, ApiError> {
        self.check(app)?;
        self.config_updates.borrow_mut().push(update.clone());
        let mut config = self.config.borrow_mut();
        if let Some(annotations) = &update.annotations {
            let as_json: BTreeMap<String, BTreeMap<String, Option<serde_json::Value>>> = annotations
                .iter()
                .map(|(group, values)| {
                    let values = values
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone().map(serde_json::Value::from)))
                        .collect();
                    (group.clone(), values)
                })
                .collect();
            merge(&mut config.annotations, &as_json);
        }
        if let Some(tolerations) = &update.tolerations {
            merge(&mut config.tolerations, tolerations);
        }
        Ok(config.clone())
    }

    fn builds_list(&self, app: &str, limit: u32) -> Result<Page<Build>, ApiError> {
        self.check(app)?;
        let builds = self.builds.borrow();
        Ok(Page {
            count: u64::try_from(builds.len()).unwrap_or(u64::MAX),
            results: builds
                .iter()
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
        })
    }

    fn builds_create(&self, app: &str, request: &CreateBuildRequest) -> Result<Build, ApiError> {
        self.check(app)?;
        self.build_requests.borrow_mut().push(request.clone());
        let build = Build {
            app: app.to_owned(),
            image: request.image.clone(),
            procfile: request.procfile.clone(),
            ..Build::default()
        };
        self.builds.borrow_mut().push(build.clone());
        Ok(build)
    }
}
