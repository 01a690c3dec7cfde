//! Repository-relative path validation.
//!
//! Every file parameter that reaches the engine comes from a client, so it is
//! checked against the repository root before git or the filesystem sees it.
//! Two layers apply: a lexical pass that rejects absolute paths and `..`
//! escapes without touching the disk, and for reads a canonical pass that
//! rejects symlinks resolving outside the root.

use crate::core::error::{GitwappError, Result};
use std::path::{Component, Path, PathBuf};

/// Lexically normalize `file` into a path relative to the repository root.
///
/// Fails with `PathTraversalRejected` for absolute paths, drive prefixes and
/// any `..` that climbs above the root.
pub fn normalize_relative(file: &str) -> Result<PathBuf> {
    if file.trim().is_empty() {
        return Err(GitwappError::file_not_found(file));
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(file).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(GitwappError::path_traversal(file));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(GitwappError::path_traversal(file));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(GitwappError::file_not_found(file));
    }

    Ok(normalized)
}

/// Resolve `file` to a canonical path that exists and lies inside `root`.
///
/// Containment is decided before existence: a path that leads outside the
/// root is `PathTraversalRejected` whether or not its target exists.
pub fn resolve_existing(root: &Path, file: &str) -> Result<PathBuf> {
    match resolve_contained(root, file)? {
        Some(canonical) => Ok(canonical),
        None => Err(GitwappError::file_not_found(normalize_relative(file)?)),
    }
}

/// Containment check for `file` under `root` that tolerates missing paths.
///
/// The deepest existing ancestor of the joined path is canonicalized and must
/// stay inside the root. A dangling symlink at the first missing component is
/// judged by its target. Returns the canonical path when the file exists.
pub fn resolve_contained(root: &Path, file: &str) -> Result<Option<PathBuf>> {
    let relative = normalize_relative(file)?;
    let root = root
        .canonicalize()
        .map_err(|_| GitwappError::not_a_repository(root))?;
    let joined = root.join(&relative);

    let mut existing = joined.as_path();
    let canonical = loop {
        match existing.canonicalize() {
            Ok(path) => break path,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                existing = match existing.parent() {
                    Some(parent) => parent,
                    None => return Err(GitwappError::file_not_found(relative)),
                };
            }
            Err(e) => return Err(GitwappError::Io(e)),
        }
    };

    let escapes = if !canonical.starts_with(&root) {
        true
    } else if existing != joined.as_path() {
        dangling_link_escapes(&root, &canonical, existing, &joined)?
    } else {
        false
    };

    if escapes {
        log::warn!("Rejected {} resolving outside {}", file, root.display());
        return Err(GitwappError::path_traversal(file));
    }

    Ok((existing == joined.as_path()).then_some(canonical))
}

/// Whether the first missing component below `existing` is a symlink whose
/// target lies outside `root`
fn dangling_link_escapes(
    root: &Path,
    canonical_parent: &Path,
    existing: &Path,
    joined: &Path,
) -> Result<bool> {
    let Some(next) = joined
        .strip_prefix(existing)
        .ok()
        .and_then(|rest| rest.components().next())
    else {
        return Ok(false);
    };
    let candidate = existing.join(next);

    match std::fs::symlink_metadata(&candidate) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = std::fs::read_link(&candidate)?;
            let target = lexical_absolute(&canonical_parent.join(target));
            Ok(!target.starts_with(root))
        }
        _ => Ok(false),
    }
}

/// Collapse `.` and `..` in an absolute path without touching the disk
fn lexical_absolute(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other),
        }
    }
    out
}

/// Render a relative path the way git stores it in the index
pub fn to_git_path(relative: &Path) -> Result<String> {
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    parts
        .map(|parts| parts.join("/"))
        .ok_or(GitwappError::InvalidUtf8Path)
}
