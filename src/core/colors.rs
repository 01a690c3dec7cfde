//! Unified color system for status codes.
//!
//! All terminal coloring of [`StatusCode`]s goes through
//! [`get_status_color_style`] so the status listing, sync summaries and diffs
//! agree on one palette.
//!
//! # Public API
//! - [`get_status_color_style`]: Get color function for a status code
//! - [`get_status_pair`]: Two-column `XY` code like `git status --short`
//! - [`get_colored_path`]: Apply status color to file paths
//! - [`format_file_status`]: Complete file line formatting
//! - [`colorize_diff_line`]: Patch line coloring
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Renamed/Copied**: Blue
//! - **Untracked**: Cyan
//! - **Unmerged**: Red bold

use crate::core::{git_status::StatusCode, state::FileStatus};
use colored::*;

/// Returns a closure that applies the color for `status` to any text
pub fn get_status_color_style(status: StatusCode) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        StatusCode::Modified => Box::new(|text: &str| text.yellow()),
        StatusCode::Untracked => Box::new(|text: &str| text.cyan()),
        StatusCode::Deleted => Box::new(|text: &str| text.red()),
        StatusCode::Added => Box::new(|text: &str| text.green()),
        StatusCode::Renamed => Box::new(|text: &str| text.blue()),
        StatusCode::Copied => Box::new(|text: &str| text.blue()),
        StatusCode::UpdatedButUnmerged => Box::new(|text: &str| text.red().bold()),
        StatusCode::Unmodified => Box::new(|text: &str| text.normal()),
    }
}

/// Both axes side by side, each in its own color
pub fn get_status_pair(file: &FileStatus) -> String {
    let staging = get_status_color_style(file.staging)(file.staging.as_str());
    let worktree = get_status_color_style(file.worktree)(file.worktree.as_str());
    format!("{staging}{worktree}")
}

/// Path colored by the more significant of the two axes
pub fn get_colored_path(file: &FileStatus, path: &str) -> ColoredString {
    let status = if file.worktree != StatusCode::Unmodified {
        file.worktree
    } else {
        file.staging
    };
    get_status_color_style(status)(path)
}

pub fn format_file_status(path: &str, file: &FileStatus) -> String {
    format!("  {}  {}", get_status_pair(file), get_colored_path(file, path))
}

pub fn colorize_diff_line(line: &str) -> ColoredString {
    if line.starts_with("+++") || line.starts_with("---") || line.starts_with("diff ") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}
