//! Per-file git status codes.
//!
//! This module defines [`StatusCode`], the classification used on both axes of a
//! file's state: *staging* (index vs HEAD) and *worktree* (working copy vs
//! index). The numeric value of each variant is the ASCII byte the browser UI
//! classifies on, so it is serialized as a plain integer.
//!
//! # Public API
//! - [`StatusCode`]: Status enumeration with stable byte codes
//!
//! # Key Features
//! - **Stable codes**: `' '` (32) unmodified, `'?'` (63) untracked, etc.
//! - **git2 integration**: Separate conversions for the staging and worktree axes
//! - **Display formatting**: Single-character symbols for terminal output

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of one file on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    /// No change (' ')
    Unmodified = b' ',
    /// Not tracked by git ('?')
    Untracked = b'?',
    /// Content changed (M)
    Modified = b'M',
    /// New file in index (A)
    Added = b'A',
    /// Removed (D)
    Deleted = b'D',
    /// Renamed (R)
    Renamed = b'R',
    /// Copied (C)
    Copied = b'C',
    /// Conflicted, both sides changed (U)
    UpdatedButUnmerged = b'U',
}

impl StatusCode {
    /// Staging axis: how the index differs from HEAD
    pub fn from_git2_staging(flags: git2::Status) -> StatusCode {
        if flags.contains(git2::Status::CONFLICTED) {
            return StatusCode::UpdatedButUnmerged;
        }
        if flags.contains(git2::Status::INDEX_NEW) {
            return StatusCode::Added;
        }
        if flags.contains(git2::Status::INDEX_MODIFIED)
            || flags.contains(git2::Status::INDEX_TYPECHANGE)
        {
            return StatusCode::Modified;
        }
        if flags.contains(git2::Status::INDEX_DELETED) {
            return StatusCode::Deleted;
        }
        if flags.contains(git2::Status::INDEX_RENAMED) {
            return StatusCode::Renamed;
        }
        // Only a path absent from the index is untracked on this axis
        if flags.contains(git2::Status::WT_NEW) {
            return StatusCode::Untracked;
        }

        StatusCode::Unmodified
    }

    /// Worktree axis: how the working copy differs from the index
    pub fn from_git2_worktree(flags: git2::Status) -> StatusCode {
        if flags.contains(git2::Status::CONFLICTED) {
            return StatusCode::UpdatedButUnmerged;
        }
        if flags.contains(git2::Status::WT_NEW) {
            return StatusCode::Untracked;
        }
        if flags.contains(git2::Status::WT_MODIFIED) || flags.contains(git2::Status::WT_TYPECHANGE)
        {
            return StatusCode::Modified;
        }
        if flags.contains(git2::Status::WT_DELETED) {
            return StatusCode::Deleted;
        }
        if flags.contains(git2::Status::WT_RENAMED) {
            return StatusCode::Renamed;
        }

        StatusCode::Unmodified
    }

    /// The byte code consumed by the UI
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<StatusCode> {
        match code {
            b' ' => Some(StatusCode::Unmodified),
            b'?' => Some(StatusCode::Untracked),
            b'M' => Some(StatusCode::Modified),
            b'A' => Some(StatusCode::Added),
            b'D' => Some(StatusCode::Deleted),
            b'R' => Some(StatusCode::Renamed),
            b'C' => Some(StatusCode::Copied),
            b'U' => Some(StatusCode::UpdatedButUnmerged),
            _ => None,
        }
    }

    /// Get the symbol for terminal display
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Unmodified => " ",
            StatusCode::Untracked => "?",
            StatusCode::Modified => "M",
            StatusCode::Added => "A",
            StatusCode::Deleted => "D",
            StatusCode::Renamed => "R",
            StatusCode::Copied => "C",
            StatusCode::UpdatedButUnmerged => "U",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        StatusCode::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown status code {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_ui_contract() {
        assert_eq!(StatusCode::Unmodified.code(), 32);
        assert_eq!(StatusCode::Untracked.code(), 63);
        assert_eq!(StatusCode::Modified.code(), 77);
        assert_eq!(StatusCode::Added.code(), 65);
        assert_eq!(StatusCode::Deleted.code(), 68);
        assert_eq!(StatusCode::Renamed.code(), 82);
        assert_eq!(StatusCode::Copied.code(), 67);
        assert_eq!(StatusCode::UpdatedButUnmerged.code(), 85);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&StatusCode::Untracked).unwrap(), "63");
        assert_eq!(serde_json::to_string(&StatusCode::Unmodified).unwrap(), "32");
        let parsed: StatusCode = serde_json::from_str("77").unwrap();
        assert_eq!(parsed, StatusCode::Modified);
        assert!(serde_json::from_str::<StatusCode>("0").is_err());
    }

    #[test]
    fn test_untracked_on_both_axes() {
        let flags = git2::Status::WT_NEW;
        assert_eq!(StatusCode::from_git2_staging(flags), StatusCode::Untracked);
        assert_eq!(StatusCode::from_git2_worktree(flags), StatusCode::Untracked);
    }

    #[test]
    fn test_removed_from_index_but_kept_on_disk() {
        let flags = git2::Status::INDEX_DELETED | git2::Status::WT_NEW;
        assert_eq!(StatusCode::from_git2_staging(flags), StatusCode::Deleted);
        assert_eq!(StatusCode::from_git2_worktree(flags), StatusCode::Untracked);
    }

    #[test]
    fn test_staged_and_modified_again() {
        let flags = git2::Status::INDEX_NEW | git2::Status::WT_MODIFIED;
        assert_eq!(StatusCode::from_git2_staging(flags), StatusCode::Added);
        assert_eq!(StatusCode::from_git2_worktree(flags), StatusCode::Modified);
    }

    #[test]
    fn test_unstaged_deletion() {
        let flags = git2::Status::WT_DELETED;
        assert_eq!(StatusCode::from_git2_staging(flags), StatusCode::Unmodified);
        assert_eq!(StatusCode::from_git2_worktree(flags), StatusCode::Deleted);
    }

    #[test]
    fn test_conflicted() {
        let flags = git2::Status::CONFLICTED;
        assert_eq!(
            StatusCode::from_git2_staging(flags),
            StatusCode::UpdatedButUnmerged
        );
        assert_eq!(
            StatusCode::from_git2_worktree(flags),
            StatusCode::UpdatedButUnmerged
        );
    }

    #[test]
    fn test_typechange_reported_as_modified() {
        assert_eq!(
            StatusCode::from_git2_staging(git2::Status::INDEX_TYPECHANGE),
            StatusCode::Modified
        );
        assert_eq!(
            StatusCode::from_git2_worktree(git2::Status::WT_TYPECHANGE),
            StatusCode::Modified
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", StatusCode::Modified), "M");
        assert_eq!(format!("{}", StatusCode::Untracked), "?");
    }
}
