//! rush-api CLI
//!
//! Command-line access to the rush.json accessor, mutator and command helpers.

mod cli;
mod commands;
mod error;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use rush_core::RushApi;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = match cli.cwd {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    tracing::debug!(start = %start.display(), "resolved starting directory");

    match cli.command {
        Some(cmd) => execute_command(start, cmd),
        None => {
            println!("{} Rush workspace helpers", "rush-api".green().bold());
            println!();
            println!("Run {} for available commands.", "rush-api --help".cyan());
            Ok(0)
        }
    }
}

fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = result {
        eprintln!("{} failed to install logger: {e}", "warning:".yellow().bold());
    }
    tracing::debug!("verbose mode enabled");
}

fn execute_command(start: PathBuf, cmd: Commands) -> Result<i32> {
    let mut api = RushApi::new(start);
    match cmd {
        Commands::FindConfig => commands::run_find_config(&api)?,
        Commands::Projects { json } => commands::run_projects(&mut api, json)?,
        Commands::PackageNames => commands::run_package_names(&mut api)?,
        Commands::Scopes => commands::run_scopes(&mut api)?,
        Commands::Categories => commands::run_categories(&mut api)?,
        Commands::Project { name, json } => commands::run_project(&mut api, &name, json)?,
        Commands::Exists { name } => commands::run_exists(&mut api, &name)?,
        Commands::AddProject {
            package_name,
            project_folder,
            category,
            overwrite,
            position,
            dry_run,
        } => commands::run_add_project(
            &mut api,
            &package_name,
            &project_folder,
            category.as_deref(),
            overwrite,
            position,
            dry_run,
        )?,
        Commands::SortProjects { order, dry_run } => {
            commands::run_sort_projects(&mut api, order, dry_run)?
        }
        Commands::Exec { project, command } => {
            return commands::run_exec(&mut api, project.as_deref(), &command);
        }
        Commands::LintProfile {
            profile,
            project,
            force,
            check,
        } => commands::run_lint_profile(&mut api, profile, project.as_deref(), force, check)?,
    }
    Ok(0)
}
