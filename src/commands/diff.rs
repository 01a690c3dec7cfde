use crate::core::{
    colors::colorize_diff_line,
    command_init::CommandContext,
    error::{GitwappError, Result},
    print_info,
};
use std::io::Write;

pub fn execute_diff(context: &CommandContext, id: &str, file: &str) -> Result<()> {
    let path = context.resolve_path(id)?;

    let diff = match context.engine.file_diff(&path, file) {
        Ok(diff) => diff,
        Err(GitwappError::UntrackedFile { path }) => {
            print_info(&format!(
                "File is untracked: {}. No diff to show.",
                path.display()
            ));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if diff.is_empty() {
        print_info(&format!("No changes in {file}."));
        return Ok(());
    }

    for line in diff.lines() {
        println!("{}", colorize_diff_line(line));
    }
    Ok(())
}

/// Write the file's working-copy bytes to stdout unchanged
pub fn execute_show(context: &CommandContext, id: &str, file: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    let content = context.engine.file_content(&path, file)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}
