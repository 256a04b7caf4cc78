//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rush_core::SortOrder;
use rush_presets::LintProfile;

/// rush-api - Query and edit a Rush monorepo's rush.json
#[derive(Parser, Debug)]
#[command(name = "rush-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search upward from for rush.json
    #[arg(long, global = true, env = "RUSH_API_CWD", value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the path of the rush.json that governs the working directory
    FindConfig,

    /// List the workspace's projects
    Projects {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List package names in rush.json order
    PackageNames,

    /// List the distinct npm scopes used by projects
    Scopes,

    /// List the review categories from approvedPackagesPolicy
    Categories,

    /// Show one project, by package name or unscoped shorthand
    Project {
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print whether a package name is listed (case-insensitive)
    Exists { name: String },

    /// Add a project entry to rush.json
    ///
    /// Examples:
    ///   rush-api add-project @acme/docs apps/docs
    ///   rush-api add-project @acme/docs apps/docs --category production --position 0
    ///   rush-api add-project @acme/web apps/site --overwrite --dry-run
    AddProject {
        package_name: String,

        /// Folder relative to the workspace root
        project_folder: String,

        /// Review category for the new entry
        #[arg(short, long)]
        category: Option<String>,

        /// Replace an entry with the same package name
        #[arg(long)]
        overwrite: bool,

        /// Index to insert at; appends when omitted or past the end
        #[arg(long, value_name = "N")]
        position: Option<usize>,

        /// Print the diff without writing rush.json
        #[arg(long)]
        dry_run: bool,
    },

    /// Reorder the projects array
    SortProjects {
        /// `alphabetically` or `review-category`
        order: SortOrder,

        /// Print the diff without writing rush.json
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a command in the workspace root or a project folder
    ///
    /// Examples:
    ///   rush-api exec -- git status
    ///   rush-api exec --project web -- npm test
    Exec {
        /// Project to run in, by package name or shorthand
        #[arg(short, long)]
        project: Option<String>,

        /// Program and arguments
        #[arg(last = true, required = true, value_name = "COMMAND")]
        command: Vec<String>,
    },

    /// Write or check an ESLint profile in a project folder
    LintProfile {
        /// Profile name (node14)
        profile: LintProfile,

        /// Project to write into; the workspace root when omitted
        #[arg(short, long)]
        project: Option<String>,

        /// Overwrite an existing .eslintrc.json
        #[arg(long, conflicts_with = "check")]
        force: bool,

        /// Report whether the existing file matches instead of writing
        #[arg(long)]
        check: bool,
    },
}
