//! Canned `rush.json` texts.

/// A commented `rush.json` with four projects in two review categories.
///
/// The project list is deliberately unsorted.
pub const RUSH_JSON: &str = r#"/**
 * This is the main configuration file for Rush.
 */
{
  "$schema": "https://developer.microsoft.com/json-schemas/rush/v5/rush.schema.json",
  "rushVersion": "5.82.0",
  "pnpmVersion": "7.9.0",

  "approvedPackagesPolicy": {
    // Categories used by "rush add" reviews
    "reviewCategories": ["production", "tools"]
  },

  "projects": [
    {
      "packageName": "@acme/web",
      "projectFolder": "apps/web",
      "reviewCategory": "production"
    },
    // Shared build tooling
    {
      "packageName": "build-tools",
      "projectFolder": "tools/build-tools",
      "reviewCategory": "tools"
    },
    {
      "packageName": "@acme/api",
      "projectFolder": "apps/api",
      "reviewCategory": "production",
      "shouldPublish": true
    },
    {
      "packageName": "@tools/lint",
      "projectFolder": "tools/lint",
      "reviewCategory": "tools"
    }
  ]
}
"#;

/// Project folders referenced by [`RUSH_JSON`].
pub const RUSH_JSON_FOLDERS: &[&str] = &["apps/web", "tools/build-tools", "apps/api", "tools/lint"];

/// A `rush.json` without the required `rushVersion` field.
pub const RUSH_JSON_NO_VERSION: &str = r#"{
  "projects": []
}
"#;
