//! Command implementations for rush-cli

pub mod edit;
pub mod exec;
pub mod lint;
pub mod query;

pub use edit::{run_add_project, run_sort_projects};
pub use exec::run_exec;
pub use lint::run_lint_profile;
pub use query::{
    run_categories, run_exists, run_find_config, run_package_names, run_project, run_projects,
    run_scopes,
};
