//! Read-only commands over the loaded rush.json
//!
//! Plain lists go to stdout one item per line so they can be piped.

use colored::Colorize;
use rush_core::{RushApi, RushProject};

use crate::error::Result;

pub fn run_find_config(api: &RushApi) -> Result<()> {
    println!("{}", api.find_config_path()?.display());
    Ok(())
}

pub fn run_projects(api: &mut RushApi, json: bool) -> Result<()> {
    let projects = api.projects()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    let width = projects
        .iter()
        .map(|p| p.package_name.len())
        .max()
        .unwrap_or(0);
    for project in &projects {
        println!(
            "{:<width$}  {}",
            project.package_name,
            project.project_relative_folder.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn run_package_names(api: &mut RushApi) -> Result<()> {
    print_lines(&api.package_names()?);
    Ok(())
}

pub fn run_scopes(api: &mut RushApi) -> Result<()> {
    print_lines(&api.package_scopes()?);
    Ok(())
}

pub fn run_categories(api: &mut RushApi) -> Result<()> {
    print_lines(&api.review_categories()?);
    Ok(())
}

pub fn run_project(api: &mut RushApi, name: &str, json: bool) -> Result<()> {
    let project = api.project(name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        print_project(&project);
    }
    Ok(())
}

pub fn run_exists(api: &mut RushApi, name: &str) -> Result<()> {
    println!("{}", api.project_exists(name)?);
    Ok(())
}

fn print_lines(items: &[String]) {
    for item in items {
        println!("{item}");
    }
}

fn print_project(project: &RushProject) {
    println!("{}", project.package_name.bold());
    let folder = project
        .project_folder
        .as_ref()
        .map(|p| p.display().to_string());
    let rows = [
        ("Folder", project.project_relative_folder.clone()),
        ("Path", folder),
        ("Category", project.review_category.clone()),
        ("Version policy", project.version_policy_name.clone()),
        ("Publish", Some(project.should_publish.to_string())),
    ];
    for (label, value) in rows {
        let value = value.unwrap_or_else(|| "-".to_string());
        println!("  {:<15} {}", format!("{label}:").dimmed(), value);
    }
}
