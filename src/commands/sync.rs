use crate::core::{
    command_init::CommandContext,
    error::Result,
    print_info, print_success,
    state::{PullOutcome, PushOutcome},
};

pub fn execute_push(context: &CommandContext, id: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    let remote = &context.engine.config().remote_name;

    match context.engine.push(&path)? {
        PushOutcome::Pushed => print_success(&format!("Pushed to {remote}.")),
        PushOutcome::UpToDate => print_info(&format!("{remote} is already up to date.")),
    }
    Ok(())
}

pub fn execute_pull(context: &CommandContext, id: &str) -> Result<()> {
    let path = context.resolve_path(id)?;
    let remote = &context.engine.config().remote_name;

    match context.engine.pull(&path)? {
        PullOutcome::UpToDate => print_info("Already up to date."),
        PullOutcome::FastForward => print_success(&format!("Fast-forwarded to {remote}.")),
        PullOutcome::Merged => print_success(&format!("Merged changes from {remote}.")),
    }
    Ok(())
}
