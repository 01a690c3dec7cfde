use clap::{Parser, Subcommand};
use gitwapp::commands::*;
use gitwapp::core::{command_init::CommandContext, error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitwapp")]
#[command(about = "Inspect and update tracked Git repositories")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory holding the repository registry
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tracked repositories
    Repo {
        #[command(subcommand)]
        action: RepoCommands,
    },
    /// Show branch, ahead/behind and changed files
    Status {
        id: String,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage files
    Stage {
        id: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Reset files in the index to HEAD
    Unstage {
        id: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Stage every new, modified and deleted file
    StageAll { id: String },
    /// Reset the whole index to HEAD
    UnstageAll { id: String },
    /// Commit staged changes
    Commit {
        id: String,
        #[arg(short, long)]
        message: String,
    },
    /// Push the current branch to the remote
    Push { id: String },
    /// Fetch and integrate the remote branch
    Pull { id: String },
    /// Show the diff of one file against HEAD
    Diff { id: String, file: String },
    /// Print the working-copy content of one file
    Show { id: String, file: String },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// Register a working copy
    Add {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        owner: String,
    },
    /// List registered repositories
    List,
    /// Stop tracking a repository
    Remove { id: String },
}

fn run(cli: Cli) -> Result<()> {
    let context = CommandContext::initialize(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Repo { action } => match action {
            RepoCommands::Add { path, name, owner } => {
                execute_repo_add(&context, &path, name.as_deref(), &owner)
            }
            RepoCommands::List => execute_repo_list(&context),
            RepoCommands::Remove { id } => execute_repo_remove(&context, &id),
        },
        Commands::Status { id, json } => execute_status(&context, &id, json),
        Commands::Stage { id, files } => execute_stage(&context, &id, &files),
        Commands::Unstage { id, files } => execute_unstage(&context, &id, &files),
        Commands::StageAll { id } => execute_stage_all(&context, &id),
        Commands::UnstageAll { id } => execute_unstage_all(&context, &id),
        Commands::Commit { id, message } => execute_commit(&context, &id, &message),
        Commands::Push { id } => execute_push(&context, &id),
        Commands::Pull { id } => execute_pull(&context, &id),
        Commands::Diff { id, file } => execute_diff(&context, &id, &file),
        Commands::Show { id, file } => execute_show(&context, &id, &file),
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        if e.is_retryable() {
            eprintln!("The repository is busy; retry the command.");
        }
        std::process::exit(1);
    }
}
