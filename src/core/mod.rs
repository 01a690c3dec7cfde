//! Core functionality for gitwapp.
//!
//! This module provides the repository state engine, its git operations,
//! credential handling, the repository registry and the CLI presentation
//! helpers.

pub mod auth;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod engine;
pub mod error;
pub mod git;
pub mod git_status;
pub mod output;
pub mod paths;
pub mod registry;
pub mod remote;
pub mod state;

// === Error handling ===
pub use error::{GitwappError, Result};

// === Engine ===
// Per-call operations on a working copy, configured once
pub use config::EngineConfig;
pub use engine::Engine;

// === Git operations ===
pub use git::GitRepo;
pub use git_status::StatusCode;

// === State ===
// Values returned by the engine; nothing here is cached
pub use state::{AheadBehind, FileStatus, PullOutcome, PushOutcome, StatusSnapshot};

// === Registry ===
pub use registry::{Registry, RepositoryRecord};

// === Command initialization ===
pub use command_init::CommandContext;

// === Color system ===
pub use colors::{colorize_diff_line, format_file_status, get_colored_path, get_status_color_style};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
