use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

mod common;
use common::{fixtures::*, repository::*};

fn gitwapp(data_dir: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("gitwapp")?;
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env("XDG_CONFIG_HOME", data_dir.join("config"));
    Ok(cmd)
}

#[cfg(test)]
mod diff_command_tests {
    use super::*;

    #[test]
    fn test_diff_modified_file() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "modified content\n")?;
        let (data_dir, id) = register_repo(&repo.path)?;

        gitwapp(data_dir.path())?
            .args(["diff", &id, "initial.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-initial content"))
            .stdout(predicate::str::contains("+modified content"));

        Ok(())
    }

    #[test]
    fn test_diff_untracked_file() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "new.txt", "new\n")?;
        let (data_dir, id) = register_repo(&repo.path)?;

        gitwapp(data_dir.path())?
            .args(["diff", &id, "new.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("untracked"));

        Ok(())
    }

    #[test]
    fn test_diff_unchanged_file() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let (data_dir, id) = register_repo(&repo.path)?;

        gitwapp(data_dir.path())?
            .args(["diff", &id, "initial.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No changes"));

        Ok(())
    }

    #[test]
    fn test_show_prints_content() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let (data_dir, id) = register_repo(&repo.path)?;

        gitwapp(data_dir.path())?
            .args(["show", &id, "initial.txt"])
            .assert()
            .success()
            .stdout("initial content\n");

        Ok(())
    }

    #[test]
    fn test_show_rejects_traversal() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let (data_dir, id) = register_repo(&repo.path)?;

        gitwapp(data_dir.path())?
            .args(["show", &id, "../../etc/passwd"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("escapes the repository root"))
            .stdout(predicate::str::contains("root:").not());

        Ok(())
    }
}
