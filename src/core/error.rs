//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitwappError`], the single error type returned by the
//! repository state engine, the registry and the CLI commands. Each failure the
//! engine can detect is its own variant so callers can match on it instead of
//! parsing messages.
//!
//! # Public API
//! - [`GitwappError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitwappError>`
//! - [`classify_git_error`]: Maps raw `git2` failures onto typed variants
//!
//! # Error Categories
//! - **Registry**: unknown repository id, duplicate or invalid paths
//! - **Repository state**: not a repository, unborn HEAD, missing commits
//! - **Paths**: missing files, traversal outside the repository root
//! - **Mutations**: empty messages, nothing to commit, lock contention
//! - **Remotes**: missing `origin`, authentication, non-fast-forward, conflicts

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for gitwapp
#[derive(Error, Debug)]
pub enum GitwappError {
    // Registry errors
    #[error("Repository not found: {id}")]
    NotFound { id: String },

    #[error("Repository already tracked: {path}")]
    DuplicateRepository { path: PathBuf },

    #[error("Path is not a directory containing a git repository: {path}")]
    InvalidRepositoryPath { path: PathBuf },

    // Repository state errors
    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("HEAD cannot be resolved (detached or empty repository)")]
    DetachedOrEmptyRepository,

    #[error("HEAD does not point to a commit")]
    NoSuchCommit,

    #[error("Invalid UTF-8 path in repository")]
    InvalidUtf8Path,

    // File errors
    #[error("File does not exist: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Path escapes the repository root: {path}")]
    PathTraversalRejected { path: PathBuf },

    #[error("File is untracked and has no diff against HEAD: {path}")]
    UntrackedFile { path: PathBuf },

    // Mutation errors
    #[error("Commit message must not be empty")]
    EmptyMessage,

    #[error("Nothing to commit, index matches HEAD")]
    NothingToCommit,

    #[error("Repository is locked by another git process, try again")]
    LockContention,

    // Remote errors
    #[error("No remote named '{remote}' is configured")]
    NoRemoteConfigured { remote: String },

    #[error("Remote has no branch '{branch}' to pull from")]
    NoUpstreamBranch { branch: String },

    #[error("No usable credentials for '{remote}' (tried: {})", .attempts.join(", "))]
    AuthenticationUnavailable {
        remote: String,
        attempts: Vec<String>,
    },

    #[error("Push of {reference} rejected: not a fast-forward, pull first")]
    NonFastForward { reference: String },

    #[error("Merge conflict, manual intervention required ({} file(s))", .paths.len())]
    MergeConflict { paths: Vec<String> },

    // Configuration errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    // Wrapped library errors
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitwappError
pub type Result<T> = std::result::Result<T, GitwappError>;

impl GitwappError {
    /// Create a registry not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a not a repository error
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        Self::NotARepository { path: path.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a path traversal rejection
    pub fn path_traversal(path: impl Into<PathBuf>) -> Self {
        Self::PathTraversalRejected { path: path.into() }
    }

    /// Create an untracked file error
    pub fn untracked_file(path: impl Into<PathBuf>) -> Self {
        Self::UntrackedFile { path: path.into() }
    }

    /// Create a no remote configured error
    pub fn no_remote(remote: impl Into<String>) -> Self {
        Self::NoRemoteConfigured {
            remote: remote.into(),
        }
    }

    /// Create a non fast-forward error
    pub fn non_fast_forward(reference: impl Into<String>) -> Self {
        Self::NonFastForward {
            reference: reference.into(),
        }
    }

    /// Whether the caller may reasonably retry the same operation unchanged.
    ///
    /// Only lock contention qualifies: another git process held `index.lock`
    /// and will usually release it shortly. Nothing is retried internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockContention)
    }
}

/// Map a raw `git2` error onto the typed taxonomy where the code is specific
/// enough, otherwise wrap it unchanged.
pub fn classify_git_error(err: git2::Error) -> GitwappError {
    match err.code() {
        git2::ErrorCode::Locked => GitwappError::LockContention,
        git2::ErrorCode::NotFastForward => GitwappError::non_fast_forward(err.message()),
        git2::ErrorCode::Conflict | git2::ErrorCode::MergeConflict | git2::ErrorCode::Unmerged => {
            GitwappError::MergeConflict { paths: Vec::new() }
        }
        _ => GitwappError::Git(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitwappError::EmptyMessage;
        assert_eq!(err.to_string(), "Commit message must not be empty");
    }

    #[test]
    fn test_file_not_found_error() {
        let err = GitwappError::file_not_found("test.txt");
        assert_eq!(err.to_string(), "File does not exist: test.txt");
    }

    #[test]
    fn test_not_found_is_not_file_not_found() {
        let err = GitwappError::not_found("abc-123");
        assert!(matches!(err, GitwappError::NotFound { .. }));
        assert_eq!(err.to_string(), "Repository not found: abc-123");
    }

    #[test]
    fn test_traversal_message_differs_from_missing_file() {
        let traversal = GitwappError::path_traversal("../../etc/passwd").to_string();
        let missing = GitwappError::file_not_found("../../etc/passwd").to_string();
        assert_ne!(traversal, missing);
        assert!(traversal.contains("escapes the repository root"));
    }

    #[test]
    fn test_authentication_lists_attempts() {
        let err = GitwappError::AuthenticationUnavailable {
            remote: "origin".to_string(),
            attempts: vec!["ssh-agent".to_string(), "~/.ssh/id_rsa".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No usable credentials for 'origin' (tried: ssh-agent, ~/.ssh/id_rsa)"
        );
    }

    #[test]
    fn test_merge_conflict_counts_files() {
        let err = GitwappError::MergeConflict {
            paths: vec!["a.txt".to_string(), "b.txt".to_string()],
        };
        assert!(err.to_string().contains("2 file(s)"));
        assert!(err.to_string().contains("manual intervention"));
    }

    #[test]
    fn test_only_lock_contention_is_retryable() {
        assert!(GitwappError::LockContention.is_retryable());
        assert!(!GitwappError::NothingToCommit.is_retryable());
        assert!(!GitwappError::non_fast_forward("refs/heads/main").is_retryable());
    }

    #[test]
    fn test_classify_locked() {
        let err = git2::Error::new(
            git2::ErrorCode::Locked,
            git2::ErrorClass::Index,
            "index.lock exists",
        );
        assert!(matches!(
            classify_git_error(err),
            GitwappError::LockContention
        ));
    }

    #[test]
    fn test_classify_not_fast_forward() {
        let err = git2::Error::new(
            git2::ErrorCode::NotFastForward,
            git2::ErrorClass::Reference,
            "cannot push non-fastforwardable reference",
        );
        assert!(matches!(
            classify_git_error(err),
            GitwappError::NonFastForward { .. }
        ));
    }

    #[test]
    fn test_classify_passthrough() {
        let err = git2::Error::from_str("something else");
        assert!(matches!(classify_git_error(err), GitwappError::Git(_)));
    }
}
