use crate::core::{command_init::CommandContext, error::Result, print_success};
use colored::*;

pub fn execute_commit(context: &CommandContext, id: &str, message: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    let oid = context.engine.commit(&path, message)?;

    let short = &oid[..oid.len().min(7)];
    let summary = message.lines().next().unwrap_or_default();
    print_success(&format!("[{}] {}", short.yellow(), summary));
    Ok(())
}
