//! Typed subset of the ESLint legacy configuration format

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top level of an `.eslintrc.json` file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintConfig {
    #[serde(default)]
    pub root: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, bool>,
    /// An empty string selects ESLint's built-in parser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<EslintOverride>,
}

/// Settings applied to files matching `files`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintOverride {
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parser_options: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, Value>,
}

impl EslintOverride {
    pub fn for_files<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            files: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Whether an override applies to `file_name`, using the `*.ext`
    /// patterns presets are written with.
    pub fn matches(&self, file_name: &str) -> bool {
        self.files.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => file_name.ends_with(suffix),
            None => file_name == pattern,
        })
    }
}

impl EslintConfig {
    /// Overrides that apply to `file_name`, in declaration order.
    pub fn overrides_for<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a EslintOverride> {
        self.overrides.iter().filter(move |o| o.matches(file_name))
    }
}
