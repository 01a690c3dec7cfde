use crate::core::{
    colors::format_file_status,
    command_init::CommandContext,
    error::Result,
    git_status::StatusCode,
    print_info, print_section_header, print_warning,
    state::StatusSnapshot,
};
use colored::*;

pub fn execute_status(context: &CommandContext, id: &str, json: bool) -> Result<()> {
    let path = context.resolve_path(id)?;
    let snapshot = context.engine.status(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "\n{} {}{}",
        "On branch".bright_black(),
        snapshot.branch.white().bold(),
        format_ahead_behind(&snapshot)
    );

    if snapshot.degraded {
        print_warning("History too long to compare with the remote, ahead/behind unknown");
    }

    if snapshot.clean {
        print_info("Nothing to commit, working tree clean");
        return Ok(());
    }

    print_grouped_status_sections(&snapshot);
    Ok(())
}

fn format_ahead_behind(snapshot: &StatusSnapshot) -> String {
    let counts = match (snapshot.ahead, snapshot.behind) {
        (0, 0) => return String::new(),
        (ahead, 0) => format!("+{ahead}"),
        (0, behind) => format!("-{behind}"),
        (ahead, behind) => format!("+{ahead}/-{behind}"),
    };
    format!(
        " {}{}{}",
        "(".bright_black(),
        counts.white(),
        ")".bright_black()
    )
}

/// Print staged, unstaged, untracked and unmerged paths under their own headers
pub fn print_grouped_status_sections(snapshot: &StatusSnapshot) {
    let mut staged = Vec::new();
    let mut unstaged = Vec::new();
    let mut untracked = Vec::new();
    let mut unmerged = Vec::new();

    for (path, file) in &snapshot.entries {
        if file.staging == StatusCode::UpdatedButUnmerged {
            unmerged.push((path, file));
        } else {
            if file.is_staged() {
                staged.push((path, file));
            }
            if file.is_untracked() {
                untracked.push((path, file));
            } else if file.worktree != StatusCode::Unmodified {
                unstaged.push((path, file));
            }
        }
    }

    let sections = [
        ("Unmerged paths", unmerged),
        ("Changes staged for commit", staged),
        ("Changes not staged for commit", unstaged),
        ("Untracked files", untracked),
    ];

    for (header, files) in sections {
        if files.is_empty() {
            continue;
        }
        print_section_header(header);
        for (path, file) in files {
            println!("{}", format_file_status(path, file));
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{AheadBehind, FileStatus};
    use std::collections::BTreeMap;

    fn snapshot(ahead: usize, behind: usize) -> StatusSnapshot {
        StatusSnapshot::new(
            "main".to_string(),
            BTreeMap::new(),
            AheadBehind::exact(ahead, behind),
        )
    }

    #[test]
    fn test_ahead_behind_text() {
        assert_eq!(format_ahead_behind(&snapshot(0, 0)), "");
        assert!(format_ahead_behind(&snapshot(2, 0)).contains("+2"));
        assert!(format_ahead_behind(&snapshot(0, 3)).contains("-3"));
        assert!(format_ahead_behind(&snapshot(1, 1)).contains("+1/-1"));
    }

    #[test]
    fn test_grouping_does_not_panic() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "both.txt".to_string(),
            FileStatus {
                staging: StatusCode::Modified,
                worktree: StatusCode::Modified,
            },
        );
        entries.insert(
            "new.txt".to_string(),
            FileStatus {
                staging: StatusCode::Untracked,
                worktree: StatusCode::Untracked,
            },
        );
        let snapshot = StatusSnapshot::new("main".to_string(), entries, AheadBehind::default());
        print_grouped_status_sections(&snapshot);
    }
}
