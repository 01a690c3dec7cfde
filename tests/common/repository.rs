//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories, bare remotes and clones
//! with the `git` command line, so the engine is always checked against
//! repositories written by real git.

#![allow(dead_code)]

use gitwapp::core::error::{GitwappError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Run a git command in `dir`, returning its trimmed stdout
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(GitwappError::Io)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn configure_identity(repo_path: &Path) -> Result<()> {
    git(repo_path, &["config", "user.name", "Test User"])?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a fresh git repository on branch `main`
///
/// # Example
///
/// ```rust
/// use gitwapp_tests::common::setup_test_repo;
///
/// #[test]
/// fn my_test() -> anyhow::Result<()> {
///     let repo = setup_test_repo()?;
///     // Use repo.path() for git operations
///     Ok(())
/// }
/// ```
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitwappError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "-b", "main"])?;
    configure_identity(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file with specified content, creating parent directories
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(GitwappError::Io)?;
    }
    fs::write(path, content).map_err(GitwappError::Io)?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename)).map_err(GitwappError::Io)?;
    Ok(())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Full id of the commit HEAD points at
pub fn head_oid(repo_path: &Path) -> Result<String> {
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Number of commits reachable from HEAD
pub fn commit_count(repo_path: &Path) -> Result<usize> {
    let count = git(repo_path, &["rev-list", "--count", "HEAD"])?;
    Ok(count.parse().unwrap_or(0))
}

/// Creates an empty bare repository whose HEAD is `main`
pub fn setup_bare_remote() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitwappError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "--bare", "-b", "main"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Working copy with one commit, pushed to a fresh bare `origin`.
/// Returns `(remote, local)`; the local branch tracks `origin/main`.
pub fn setup_repo_with_remote() -> Result<(TestRepo, TestRepo)> {
    let remote = setup_bare_remote()?;
    let local = setup_test_repo_with_initial_commit()?;

    let url = remote.path.to_string_lossy().into_owned();
    git(&local.path, &["remote", "add", "origin", &url])?;
    git(&local.path, &["push", "-u", "origin", "main"])?;

    Ok((remote, local))
}

/// Clone `remote` into a new temporary working copy with a test identity
pub fn clone_repo(remote: &TestRepo) -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitwappError::Io)?;
    let repo_path = temp_dir.path().join("clone");
    let url = remote.path.to_string_lossy().into_owned();

    git(
        temp_dir.path(),
        &["clone", &url, &repo_path.to_string_lossy()],
    )?;
    configure_identity(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Commit a new file to advance the current branch
pub fn commit_new_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    create_file(repo_path, filename, content)?;
    git_add(repo_path, filename)?;
    git_commit(repo_path, &format!("Add {filename}"))?;
    Ok(())
}
