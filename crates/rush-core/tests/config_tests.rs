//! Tests for locating, loading, caching and querying rush.json

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rush_core::config::{ConfigCache, ConfigHandle, RushConfiguration, resolve_config_path};
use rush_core::Error;
use rush_test_utils::TestWorkspace;

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap()
}

mod resolve_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("apps")]
    #[case("apps/web")]
    #[case("apps/web/src/deep")]
    #[case("apps/web/package.json")]
    fn test_resolves_same_file_from_any_nested_path(#[case] rel: &str) {
        let ws = TestWorkspace::standard();
        std::fs::create_dir_all(ws.path("apps/web/src/deep")).unwrap();
        ws.write("apps/web/package.json", "{}");

        let found = resolve_config_path(&ws.path(rel)).unwrap();
        assert_eq!(found, canonical(&ws.path("rush.json")));
    }

    #[test]
    fn test_empty_start_path() {
        let err = resolve_config_path(Path::new("")).unwrap_err();
        assert!(matches!(err, Error::EmptyStartPath));
    }

    #[test]
    fn test_missing_start_path_is_not_found() {
        let ws = TestWorkspace::new();
        let err = resolve_config_path(&ws.path("does/not/exist")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }), "got {err}");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_directory_without_config() {
        let ws = TestWorkspace::new();
        std::fs::create_dir_all(ws.path("lonely")).unwrap();
        let err = resolve_config_path(&ws.path("lonely")).unwrap_err();
        assert!(err.to_string().contains("cannot be found"));
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_standard_workspace() {
        let ws = TestWorkspace::standard();
        let config = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap();

        assert_eq!(config.rush_version().to_string(), "5.82.0");
        assert_eq!(config.root_dir(), canonical(ws.root()));
        assert_eq!(
            config.package_names(),
            vec!["@acme/web", "build-tools", "@acme/api", "@tools/lint"]
        );
        assert_eq!(config.project_folder_min_depth(), 1);
        assert_eq!(config.project_folder_max_depth(), 2);

        let api = config.get_project_by_name("@acme/api").unwrap();
        assert!(api.should_publish);
        assert_eq!(api.review_category.as_deref(), Some("production"));
    }

    #[test]
    fn test_missing_rush_version_is_load_error() {
        let ws = TestWorkspace::new().without_rush_version().build();
        let err = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap_err();

        match err {
            Error::Load { source, .. } => {
                assert!(matches!(*source, Error::Invalid(_)));
                assert!(source.to_string().contains("rushVersion"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        let ws = TestWorkspace::new();
        ws.write("rush.json", "{ \"rushVersion\": \"5.82.0\", ");
        let err = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap_err();

        match err {
            Error::Load { source, path } => {
                assert!(matches!(*source, Error::Content(_)));
                assert_eq!(path, canonical(&ws.path("rush.json")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_project_is_load_error() {
        let ws = TestWorkspace::new()
            .project("a", "libs/a")
            .project("a", "libs/b")
            .build();
        let err = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap_err();
        assert!(err.to_string().contains("more than once"), "got {err}");
    }

    #[test]
    fn test_project_folder_too_deep() {
        let ws = TestWorkspace::new().project("a", "libs/group/a").build();
        let err = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap_err();
        assert!(err.to_string().contains("depth 3"), "got {err}");
    }

    #[test]
    fn test_invalid_version() {
        let ws = TestWorkspace::new().rush_version("five").build();
        let err = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap_err();
        assert!(err.to_string().contains("not a valid version"), "got {err}");
    }
}

mod cache_tests {
    use super::*;

    #[test]
    fn test_cached_handle_is_reference_stable() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        let first = cache.load(&handle, false).unwrap();
        let second = cache.load(&handle, false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_force_reloads_from_disk() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        let first = cache.load(&handle, false).unwrap();
        ws.write(
            "rush.json",
            &ws.read("rush.json").replace("\"@tools/lint\"", "\"@tools/eslint\""),
        );

        let stale = cache.load(&handle, false).unwrap();
        assert!(stale.project_exists("@tools/lint"));

        let fresh = cache.load(&handle, true).unwrap();
        assert!(!Arc::ptr_eq(&first, &fresh));
        assert!(fresh.project_exists("@tools/eslint"));
    }

    #[test]
    fn test_loaded_handle_is_returned_unchanged() {
        let ws = TestWorkspace::standard();
        let config = Arc::new(RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap());
        let mut cache = ConfigCache::new();

        let loaded = cache
            .load(&ConfigHandle::from(Arc::clone(&config)), true)
            .unwrap();
        assert!(Arc::ptr_eq(&config, &loaded));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_literal_paths() {
        let ws = TestWorkspace::standard();
        let mut cache = ConfigCache::new();

        let from_root = cache.load(&ConfigHandle::from(ws.root()), false).unwrap();
        let from_app = cache
            .load(&ConfigHandle::from(ws.path("apps/web")), false)
            .unwrap();
        assert!(!Arc::ptr_eq(&from_root, &from_app));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&ws.path("apps/web")));
        assert!(!cache.invalidate(&ws.path("apps/web")));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_error_is_not_cached() {
        let ws = TestWorkspace::new();
        ws.write("rush.json", "not json");
        let mut cache = ConfigCache::new();
        let handle = ConfigHandle::from(ws.root());

        assert!(matches!(cache.load(&handle, false), Err(Error::Load { .. })));
        assert!(cache.is_empty());
    }
}

mod accessor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn standard() -> (TestWorkspace, Arc<RushConfiguration>) {
        let ws = TestWorkspace::standard();
        let config = ConfigCache::new()
            .load(&ConfigHandle::from(ws.root()), false)
            .unwrap();
        (ws, config)
    }

    #[test]
    fn test_exact_and_shorthand_lookup() {
        let (_ws, config) = standard();
        assert_eq!(config.project("@acme/web").unwrap().package_name, "@acme/web");
        assert_eq!(config.project("web").unwrap().package_name, "@acme/web");
        assert_eq!(config.project("lint").unwrap().package_name, "@tools/lint");
        assert_eq!(config.project("build-tools").unwrap().package_name, "build-tools");
    }

    #[test]
    fn test_unknown_project() {
        let (_ws, config) = standard();
        let err = config.project("mobile").unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { ref name } if name == "mobile"));
    }

    #[test]
    fn test_ambiguous_shorthand() {
        let ws = TestWorkspace::new()
            .project("@a/utils", "a/utils")
            .project("@b/utils", "b/utils")
            .build();
        let config = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap();

        assert!(config.find_project_by_shorthand_name("utils").is_none());
        assert!(config.project("utils").is_err());
        assert!(config.project("@b/utils").is_ok());
    }

    #[test]
    fn test_project_dirs() {
        let (ws, config) = standard();
        assert_eq!(
            config.project_dir("web").unwrap(),
            canonical(ws.root()).join("apps/web")
        );
        assert_eq!(config.project_relative_dir("web").unwrap(), "apps/web");
    }

    #[test]
    fn test_missing_project_folder() {
        let ws = TestWorkspace::new().project("floating", "").build();
        let config = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap();

        let err = config.project_dir("floating").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { ref field, .. } if field == "projectFolder"
        ));
        let err = config.project_relative_dir("floating").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { ref field, .. } if field == "projectRelativeFolder"
        ));
    }

    #[test]
    fn test_scopes_and_categories() {
        let (_ws, config) = standard();
        assert_eq!(config.package_scopes(), vec!["@acme", "@tools"]);
        assert_eq!(config.review_categories().unwrap(), vec!["production", "tools"]);
    }

    #[test]
    fn test_review_categories_absent() {
        let ws = TestWorkspace::new().project("a", "libs/a").build();
        let config = RushConfiguration::load_from_file(&ws.path("rush.json")).unwrap();
        assert!(matches!(
            config.review_categories(),
            Err(Error::ReviewCategoriesNotFound)
        ));
    }

    #[test]
    fn test_project_exists_ignores_case() {
        let (_ws, config) = standard();
        assert!(config.project_exists("@ACME/WEB"));
        assert!(config.project_exists("Build-Tools"));
        assert!(!config.project_exists("web"));
    }
}
