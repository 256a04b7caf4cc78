//! Serde views of `rush.json` used for typed edits

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A key that may be absent, explicitly `null`, or set.
///
/// The outer `None` means the key is absent and is skipped on output;
/// `Some(None)` writes `null` back.
pub type Nullable<T> = Option<Option<T>>;

/// Deserialize a present key as `Some`, so `null` survives as `Some(None)`
/// (or `Some(Value::Null)`) instead of collapsing into "absent".
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One entry of the `projects` array.
///
/// Unknown keys are kept in `extra` and known optional keys remember
/// whether they were absent or `null`, so a typed round trip reproduces
/// every record exactly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub package_name: String,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub project_folder: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub review_category: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cyclic_dependency_projects: Nullable<Vec<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version_policy_name: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub should_publish: Nullable<bool>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub skip_rush_check: Nullable<bool>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub publish_folder: Nullable<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn set<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

impl ProjectRecord {
    pub fn new(package_name: impl Into<String>, project_folder: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            project_folder: Some(Some(project_folder.into())),
            ..Self::default()
        }
    }

    pub fn with_review_category(mut self, category: impl Into<String>) -> Self {
        self.review_category = Some(Some(category.into()));
        self
    }

    /// `projectFolder` when set to a non-empty string.
    pub fn project_folder(&self) -> Option<&str> {
        set(&self.project_folder)
            .map(String::as_str)
            .filter(|folder| !folder.is_empty())
    }

    pub fn review_category(&self) -> Option<&str> {
        set(&self.review_category).map(String::as_str)
    }

    pub fn cyclic_dependency_projects(&self) -> &[String] {
        set(&self.cyclic_dependency_projects).map_or(&[], Vec::as_slice)
    }

    pub fn version_policy_name(&self) -> Option<&str> {
        set(&self.version_policy_name).map(String::as_str)
    }

    pub fn should_publish(&self) -> bool {
        set(&self.should_publish).copied().unwrap_or(false)
    }

    pub fn skip_rush_check(&self) -> bool {
        set(&self.skip_rush_check).copied().unwrap_or(false)
    }

    pub fn publish_folder(&self) -> Option<&str> {
        set(&self.publish_folder).map(String::as_str)
    }
}

/// The whole `rush.json` document as seen by typed edits.
///
/// `rush_version` stays an untyped value so the "is this really a Rush
/// config" check can judge whatever the file holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RushJsonDocument {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rush_version: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectRecord>>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl RushJsonDocument {
    /// The project list, created empty when the document has none.
    pub fn projects_mut(&mut self) -> &mut Vec<ProjectRecord> {
        self.projects.get_or_insert_with(Vec::new)
    }

    /// Whether `rushVersion` holds a truthy value.
    pub fn has_version_marker(&self) -> bool {
        self.rush_version.as_ref().is_some_and(is_truthy)
    }
}

/// Truthiness in the sense of the JavaScript tooling that shares these
/// files: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
