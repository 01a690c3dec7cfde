//! Snapshot and outcome types produced by the state engine.
//!
//! Nothing here is cached: a [`StatusSnapshot`] is built fresh on every
//! request and dropped once serialized, because the working copy can change
//! underneath us at any time.
//!
//! # Public API
//! - [`StatusSnapshot`]: Point-in-time synchronization state of one repository
//! - [`FileStatus`]: Staging/worktree classification of one path
//! - [`AheadBehind`]: Commit counts relative to the remote-tracking branch
//! - [`PushOutcome`], [`PullOutcome`]: Results of remote operations
//!
//! # JSON Shape
//! Field names follow the format the browser client already consumes:
//! `{"Clean", "Ahead", "Behind", "Branch", "Degraded", "Worktree": {path: {"Staging", "Worktree"}}}`.

use crate::core::git_status::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileStatus {
    pub staging: StatusCode,
    pub worktree: StatusCode,
}

impl FileStatus {
    /// A file is staged when the index differs from HEAD for it
    pub fn is_staged(&self) -> bool {
        !matches!(
            self.staging,
            StatusCode::Unmodified | StatusCode::Untracked
        )
    }

    pub fn is_untracked(&self) -> bool {
        self.worktree == StatusCode::Untracked
    }

    pub fn is_unmodified(&self) -> bool {
        self.staging == StatusCode::Unmodified && self.worktree == StatusCode::Unmodified
    }
}

/// Commit counts between HEAD and its remote-tracking branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AheadBehind {
    pub ahead: usize,
    pub behind: usize,
    /// Set when a walk hit the iteration cap; counts are then reported as zero
    pub degraded: bool,
}

impl AheadBehind {
    pub fn exact(ahead: usize, behind: usize) -> Self {
        Self {
            ahead,
            behind,
            degraded: false,
        }
    }

    pub fn unknown() -> Self {
        Self {
            ahead: 0,
            behind: 0,
            degraded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusSnapshot {
    pub clean: bool,
    pub ahead: usize,
    pub behind: usize,
    pub branch: String,
    #[serde(default)]
    pub degraded: bool,
    #[serde(rename = "Worktree")]
    pub entries: BTreeMap<String, FileStatus>,
}

impl StatusSnapshot {
    pub fn new(branch: String, entries: BTreeMap<String, FileStatus>, counts: AheadBehind) -> Self {
        let clean = entries.values().all(FileStatus::is_unmodified);
        Self {
            clean,
            ahead: counts.ahead,
            behind: counts.behind,
            branch,
            degraded: counts.degraded,
            entries,
        }
    }

    pub fn staged(&self) -> impl Iterator<Item = (&String, &FileStatus)> {
        self.entries.iter().filter(|(_, s)| s.is_staged())
    }

    pub fn file(&self, path: &str) -> Option<&FileStatus> {
        self.entries.get(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    UpToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    UpToDate,
    FastForward,
    Merged,
}
