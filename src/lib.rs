//! gitwapp - a repository state engine for tracked Git working copies.
//!
//! This library reads and mutates the state of registered repositories:
//! status with ahead/behind counts, staging, commits, push and pull, and
//! contained access to file contents and diffs. Every operation opens the
//! repository fresh, so callers can poll status without coordination.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Engine`] and its [`EngineConfig`]
//! - Status snapshots and per-file status codes
//! - The repository [`Registry`]
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    AheadBehind,
    CommandContext,
    // Engine
    Engine,
    EngineConfig,
    FileStatus,
    // Error handling
    GitwappError,
    // Git operations
    GitRepo,
    PullOutcome,
    PushOutcome,
    // Registry
    Registry,
    RepositoryRecord,
    Result,
    StatusCode,
    StatusSnapshot,
};
