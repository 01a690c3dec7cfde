use crate::commands::status::print_grouped_status_sections;
use crate::core::{command_init::CommandContext, error::Result, print_info, print_success};
use std::path::Path;

pub fn execute_stage(context: &CommandContext, id: &str, files: &[String]) -> Result<()> {
    let path = context.resolve_path(id)?;
    for file in files {
        context.engine.stage(&path, file)?;
    }
    print_success(&format!("Staged {} path(s).", files.len()));
    show_updated_status(context, &path)
}

pub fn execute_unstage(context: &CommandContext, id: &str, files: &[String]) -> Result<()> {
    let path = context.resolve_path(id)?;
    for file in files {
        context.engine.unstage(&path, file)?;
    }
    print_success(&format!("Unstaged {} path(s).", files.len()));
    show_updated_status(context, &path)
}

pub fn execute_stage_all(context: &CommandContext, id: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    context.engine.stage_all(&path)?;
    print_success("Staged all changes.");
    show_updated_status(context, &path)
}

pub fn execute_unstage_all(context: &CommandContext, id: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    context.engine.unstage_all(&path)?;
    print_success("Unstaged all changes.");
    show_updated_status(context, &path)
}

fn show_updated_status(context: &CommandContext, path: &Path) -> Result<()> {
    let snapshot = context.engine.status(path)?;
    if snapshot.clean {
        return Ok(());
    }
    print_info("Updated status:");
    print_grouped_status_sections(&snapshot);
    Ok(())
}
