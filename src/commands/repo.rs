use crate::core::{
    command_init::CommandContext, error::Result, print_info, print_section_header, print_success,
};
use colored::*;
use std::path::Path;

pub fn execute_repo_add(
    context: &CommandContext,
    path: &Path,
    name: Option<&str>,
    owner: &str,
) -> Result<()> {
    let record = context.registry.add(path, name, owner)?;
    print_success(&format!(
        "Registered {} as {}",
        record.name,
        record.id.bright_black()
    ));
    Ok(())
}

pub fn execute_repo_list(context: &CommandContext) -> Result<()> {
    let records = context.registry.list()?;
    if records.is_empty() {
        print_info("No repositories registered");
        return Ok(());
    }

    print_section_header("Repositories");
    for record in &records {
        println!(
            "  {}  {}  {}",
            record.id.bright_black(),
            record.name.white().bold(),
            record.path.display()
        );
    }
    println!();
    Ok(())
}

pub fn execute_repo_remove(context: &CommandContext, id: &str) -> Result<()> {
    let record = context.registry.remove(id)?;
    print_success(&format!("Removed {} from the registry", record.name));
    Ok(())
}
