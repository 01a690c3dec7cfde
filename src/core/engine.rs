//! Repository state engine.
//!
//! [`Engine`] is the entry point for every operation a client performs on a
//! registered working copy. It holds only its [`EngineConfig`]; each call
//! opens the repository at the given path, does its work and drops the
//! handle, so nothing is cached between calls and concurrent calls share no
//! state beyond git's own lock files.
//!
//! # Public API
//! - [`Engine::status`]: snapshot of branch, ahead/behind and per-file state
//! - [`Engine::stage`], [`Engine::unstage`], [`Engine::stage_all`],
//!   [`Engine::unstage_all`]: index mutations
//! - [`Engine::commit`], [`Engine::push`], [`Engine::pull`]: history and sync
//! - [`Engine::file_content`], [`Engine::file_diff`]: contained file accessors

use crate::core::{
    config::EngineConfig,
    error::{GitwappError, Result},
    git::GitRepo,
    state::{PullOutcome, PushOutcome, StatusSnapshot},
};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read the current state of the working copy at `path`.
    ///
    /// Read-only. A walk that exceeds `max_walk` sets `degraded` and reports
    /// zero counts instead of failing.
    pub fn status(&self, path: &Path) -> Result<StatusSnapshot> {
        let repo = GitRepo::open(path)?;
        let entries = repo.get_entries()?;
        let (branch, head) = repo.get_head()?;
        let counts =
            repo.get_ahead_behind(&self.config.remote_name, &branch, head, self.config.max_walk)?;

        log::debug!(
            "Status of {}: {} changed path(s) on {branch}, +{}/-{}",
            path.display(),
            entries.len(),
            counts.ahead,
            counts.behind
        );
        Ok(StatusSnapshot::new(branch, entries, counts))
    }

    pub fn stage(&self, path: &Path, file: &str) -> Result<()> {
        log::info!("Staging {file} in {}", path.display());
        GitRepo::open(path)?.stage_file(file)
    }

    pub fn unstage(&self, path: &Path, file: &str) -> Result<()> {
        log::info!("Unstaging {file} in {}", path.display());
        GitRepo::open(path)?.unstage_file(file)
    }

    pub fn stage_all(&self, path: &Path) -> Result<()> {
        log::info!("Staging all changes in {}", path.display());
        GitRepo::open(path)?.stage_all()
    }

    pub fn unstage_all(&self, path: &Path) -> Result<()> {
        log::info!("Unstaging all changes in {}", path.display());
        GitRepo::open(path)?.unstage_all()
    }

    /// Commit the index and return the new commit id in hex.
    ///
    /// An empty or whitespace-only message is rejected before the repository
    /// is opened.
    pub fn commit(&self, path: &Path, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(GitwappError::EmptyMessage);
        }
        let oid = GitRepo::open(path)?.commit(message)?;
        Ok(oid.to_string())
    }

    pub fn push(&self, path: &Path) -> Result<PushOutcome> {
        GitRepo::open(path)?.push(&self.config)
    }

    pub fn pull(&self, path: &Path) -> Result<PullOutcome> {
        GitRepo::open(path)?.pull(&self.config)
    }

    pub fn file_content(&self, path: &Path, file: &str) -> Result<Vec<u8>> {
        GitRepo::open(path)?.read_file(file)
    }

    pub fn file_diff(&self, path: &Path, file: &str) -> Result<String> {
        GitRepo::open(path)?.diff_file(file)
    }
}
