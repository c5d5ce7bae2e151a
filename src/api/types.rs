//! Wire types exchanged with the controller.
//!
//! Read models ([`AppConfig`], [`Build`]) are lenient: unknown fields are
//! ignored and missing or `null` maps decode as empty. Write models
//! ([`ConfigUpdate`], [`CreateBuildRequest`]) only carry what the command
//! actually changes, so the controller can merge them into its state.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::ApiError;

/// Process type → annotation key → value.
pub type AnnotationSet = BTreeMap<String, BTreeMap<String, String>>;

/// Process type → toleration identifier → toleration.
pub type TolerationSet = BTreeMap<String, BTreeMap<String, Toleration>>;

/// A Kubernetes toleration attached to the pods of one process type.
///
/// Empty strings and an absent `toleration_seconds` are left out of the JSON,
/// matching how Kubernetes itself serializes the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
}

/// The config resource of an application, as returned by the controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub app: String,
    /// Annotation values are untyped on the wire; see [`AppConfig::annotation_set`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tolerations: TolerationSet,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub uuid: String,
}

impl AppConfig {
    /// Annotations with every value checked to be a string.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NonStringAnnotation` for the first value (in sorted
    /// order) that is not a JSON string. Values are never coerced.
    pub fn annotation_set(&self) -> Result<AnnotationSet, ApiError> {
        let mut set = AnnotationSet::new();
        for (proc_type, annotations) in &self.annotations {
            let group = set.entry(proc_type.clone()).or_default();
            for (key, value) in annotations {
                let serde_json::Value::String(text) = value else {
                    return Err(ApiError::NonStringAnnotation {
                        proc_type: proc_type.clone(),
                        key: key.clone(),
                    });
                };
                group.insert(key.clone(), text.clone());
            }
        }
        Ok(set)
    }
}

/// Partial update of an application's config.
///
/// Inner `None` values serialize as JSON `null`, which the controller treats as
/// "delete this key". Sections left as `None` are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, BTreeMap<String, Option<String>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<BTreeMap<String, BTreeMap<String, Option<Toleration>>>>,
}

impl ConfigUpdate {
    /// Add or overwrite annotations of one process type.
    #[must_use]
    pub fn set_annotations(proc_type: &str, annotations: BTreeMap<String, String>) -> Self {
        let values = annotations.into_iter().map(|(k, v)| (k, Some(v))).collect();
        Self {
            annotations: Some(BTreeMap::from([(proc_type.to_owned(), values)])),
            tolerations: None,
        }
    }

    /// Tombstone the given annotation keys of one process type.
    #[must_use]
    pub fn unset_annotations(proc_type: &str, keys: &[String]) -> Self {
        let values = keys.iter().map(|k| (k.clone(), None)).collect();
        Self {
            annotations: Some(BTreeMap::from([(proc_type.to_owned(), values)])),
            tolerations: None,
        }
    }

    /// Add or replace a single toleration of one process type.
    #[must_use]
    pub fn set_toleration(proc_type: &str, identifier: &str, toleration: Toleration) -> Self {
        let values = BTreeMap::from([(identifier.to_owned(), Some(toleration))]);
        Self {
            annotations: None,
            tolerations: Some(BTreeMap::from([(proc_type.to_owned(), values)])),
        }
    }

    /// Tombstone the given toleration identifiers of one process type.
    #[must_use]
    pub fn unset_tolerations(proc_type: &str, identifiers: &[String]) -> Self {
        let values = identifiers.iter().map(|id| (id.clone(), None)).collect();
        Self {
            annotations: None,
            tolerations: Some(BTreeMap::from([(proc_type.to_owned(), values)])),
        }
    }
}

/// A build of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub app: String,
    pub created: String,
    pub dockerfile: String,
    pub image: String,
    pub owner: String,
    pub procfile: BTreeMap<String, String>,
    pub sha: String,
    pub updated: String,
    pub uuid: String,
}

/// Body of `POST /v2/apps/<app>/builds/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateBuildRequest {
    pub image: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub procfile: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sidecarfile: BTreeMap<String, serde_json::Value>,
}

/// A page of a paginated list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<T>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
