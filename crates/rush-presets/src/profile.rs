//! Shipped lint profiles

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::eslint::{EslintConfig, EslintOverride};
use crate::{Error, Result};

const JS_FILES: &[&str] = &["*.js", "*.cjs", "*.mjs", "*.jsx"];
const TS_FILES: &[&str] = &["*.ts", "*.cts", "*.mts", "*.tsx"];

/// A named ESLint configuration a project can adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintProfile {
    /// Node.js 14 with ES2020 syntax, JavaScript and TypeScript sources
    Node14,
}

impl LintProfile {
    pub fn all() -> &'static [LintProfile] {
        &[Self::Node14]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Node14 => "node14",
        }
    }

    pub fn config(&self) -> EslintConfig {
        match self {
            Self::Node14 => node14(),
        }
    }

    /// Pretty-printed `.eslintrc.json` text with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.config())?;
        text.push('\n');
        Ok(text)
    }
}

impl fmt::Display for LintProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LintProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|profile| profile.name() == s)
            .ok_or_else(|| Error::UnknownProfile {
                name: s.to_string(),
                available: Self::all()
                    .iter()
                    .map(LintProfile::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn options(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn node14() -> EslintConfig {
    let javascript = EslintOverride {
        plugins: strings(&["import", "promise"]),
        parser: Some(String::new()),
        parser_options: options(json!({ "ecmaVersion": 11 })),
        extends: strings(&[
            "eslint:recommended",
            "plugin:promise/recommended",
            "plugin:import/errors",
            "plugin:import/warnings",
            "prettier",
        ]),
        ..EslintOverride::for_files(JS_FILES)
    };

    let typescript = EslintOverride {
        plugins: strings(&["@typescript-eslint/eslint-plugin", "promise"]),
        parser: Some("@typescript-eslint/parser".to_string()),
        parser_options: options(json!({
            "project": "./tsconfig.json",
            "sourceType": "module",
        })),
        extends: strings(&[
            "eslint:recommended",
            "plugin:@typescript-eslint/recommended",
            "plugin:promise/recommended",
            "prettier",
        ]),
        rules: [
            "@typescript-eslint/interface-name-prefix",
            "@typescript-eslint/explicit-function-return-type",
            "@typescript-eslint/explicit-module-boundary-types",
            "@typescript-eslint/no-explicit-any",
        ]
        .into_iter()
        .map(|rule| (rule.to_string(), json!("off")))
        .collect(),
        ..EslintOverride::for_files(TS_FILES)
    };

    EslintConfig {
        root: true,
        env: BTreeMap::from([("es2020".to_string(), true), ("node".to_string(), true)]),
        parser: Some(String::new()),
        ignore_patterns: strings(&["*.d.ts"]),
        overrides: vec![javascript, typescript],
    }
}
