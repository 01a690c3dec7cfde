//! Test data generation utilities and predefined scenarios
//!
//! Provides repositories in specific states, and registries that point at
//! them, so CLI and engine tests start from the same fixtures.

#![allow(dead_code)]

use super::repository::*;
use gitwapp::core::{
    config::EngineConfig,
    error::{GitwappError, Result},
    registry::Registry,
};
use std::path::Path;
use tempfile::TempDir;

/// Scenario: committed files that are then modified, plus new untracked files
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}

/// Data directory holding a registry with `repo_path` registered.
/// Returns the directory and the new repository id.
pub fn register_repo(repo_path: &Path) -> Result<(TempDir, String)> {
    let data_dir = TempDir::new().map_err(GitwappError::Io)?;
    let registry = Registry::open(data_dir.path())?;
    let record = registry.add(repo_path, None, "test-user")?;
    Ok((data_dir, record.id))
}

/// Engine configuration for tests: defaults with a small walk cap
pub fn small_walk_config(max_walk: usize) -> EngineConfig {
    EngineConfig {
        max_walk,
        ..Default::default()
    }
}
