//! Commands that rewrite rush.json

use colored::Colorize;
use rush_core::{PlannedEdit, ProjectRecord, RushApi, SortOrder};

use crate::error::Result;

pub fn run_add_project(
    api: &mut RushApi,
    package_name: &str,
    project_folder: &str,
    category: Option<&str>,
    overwrite: bool,
    position: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let mut record = ProjectRecord::new(package_name, project_folder);
    if let Some(category) = category {
        record = record.with_review_category(category);
    }

    let plan = api.plan_add_project(record, overwrite, position)?;
    if !plan.is_changed() {
        if !overwrite && api.project_exists(package_name)? {
            println!(
                "{} is already listed; pass {} to replace it",
                package_name.cyan(),
                "--overwrite".cyan()
            );
        } else {
            println!("rush.json is already up to date");
        }
        return Ok(());
    }

    finish(&plan, dry_run, &format!("Added {package_name}"))
}

pub fn run_sort_projects(api: &mut RushApi, order: SortOrder, dry_run: bool) -> Result<()> {
    let plan = api.plan_sort_projects(order)?;
    if !plan.is_changed() {
        println!("Projects are already in {order} order");
        return Ok(());
    }
    finish(&plan, dry_run, &format!("Sorted projects {order}"))
}

fn finish(plan: &PlannedEdit, dry_run: bool, message: &str) -> Result<()> {
    if dry_run {
        print!("{}", plan.unified_diff());
        println!("{} rush.json not written", "dry run:".yellow().bold());
        return Ok(());
    }

    plan.apply()?;
    let changes = plan.line_changes();
    println!(
        "{} {} ({} inserted, {} deleted)",
        "ok:".green().bold(),
        message,
        changes.inserted,
        changes.deleted
    );
    Ok(())
}
