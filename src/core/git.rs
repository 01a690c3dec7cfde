//! Git repository operations on one working copy.
//!
//! [`GitRepo`] is the only type that holds a `git2::Repository`. It is opened
//! for a single engine call and dropped when the call returns, so no handle
//! outlives a request.
//!
//! # Public API
//! - [`GitRepo`]: status reading, ahead/behind walks, index mutations, commits,
//!   file content and diffs. Push and pull live in [`crate::core::remote`].
//!
//! # Key Features
//! - **Status reading**: both axes of every changed path as [`StatusCode`]s
//! - **Bounded walks**: ahead/behind stop at the hidden frontier or the cap
//! - **Typed failures**: lock contention, unborn HEAD and missing files are
//!   reported as their own error variants

use crate::core::{
    error::{classify_git_error, GitwappError, Result},
    git_status::StatusCode,
    paths::{normalize_relative, resolve_contained, resolve_existing, to_git_path},
    state::{AheadBehind, FileStatus},
};
use git2::{
    DiffFormat, DiffOptions, IndexAddOption, Oid, Repository, RepositoryState, StatusOptions,
};
use std::collections::BTreeMap;
use std::path::Path;

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository whose working directory is exactly `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo =
            Repository::open(path).map_err(|_| GitwappError::not_a_repository(path))?;

        if repo.is_bare() {
            return Err(GitwappError::not_a_repository(path));
        }

        Ok(GitRepo { repo })
    }

    pub fn get_repository(&self) -> &Repository {
        &self.repo
    }

    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| GitwappError::not_a_repository(self.repo.path()))
    }

    /// Per-file classification of every path that differs from HEAD
    pub fn get_entries(&self) -> Result<BTreeMap<String, FileStatus>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts.include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut entries = BTreeMap::new();

        for entry in statuses.iter() {
            let path = entry.path().ok_or(GitwappError::InvalidUtf8Path)?;
            let flags = entry.status();

            let file = FileStatus {
                staging: StatusCode::from_git2_staging(flags),
                worktree: StatusCode::from_git2_worktree(flags),
            };
            if !file.is_unmodified() {
                entries.insert(path.to_string(), file);
            }
        }

        Ok(entries)
    }

    /// Short branch name and commit of HEAD.
    ///
    /// An unborn branch has no commit to point at, so it is reported as
    /// `DetachedOrEmptyRepository` rather than as a clean state.
    pub fn get_head(&self) -> Result<(String, Oid)> {
        let head = self
            .repo
            .head()
            .map_err(|_| GitwappError::DetachedOrEmptyRepository)?;
        let oid = head
            .target()
            .ok_or(GitwappError::DetachedOrEmptyRepository)?;
        let branch = head
            .shorthand()
            .ok_or(GitwappError::InvalidUtf8Path)?
            .to_string();
        Ok((branch, oid))
    }

    /// Commit currently recorded by `refs/remotes/<remote>/<branch>`, if any
    pub fn get_tracking_oid(&self, remote: &str, branch: &str) -> Option<Oid> {
        let name = format!("refs/remotes/{remote}/{branch}");
        self.repo
            .find_reference(&name)
            .ok()
            .and_then(|reference| reference.resolve().ok())
            .and_then(|reference| reference.target())
    }

    /// Ahead/behind counts of `local` against the remote-tracking branch.
    ///
    /// Missing tracking ref or identical commits give zero. A walk that hits
    /// `max_walk` yields [`AheadBehind::unknown`] and a warning.
    pub fn get_ahead_behind(
        &self,
        remote: &str,
        branch: &str,
        local: Oid,
        max_walk: usize,
    ) -> Result<AheadBehind> {
        let upstream = match self.get_tracking_oid(remote, branch) {
            Some(oid) => oid,
            None => {
                log::debug!("No refs/remotes/{remote}/{branch}, reporting 0/0");
                return Ok(AheadBehind::default());
            }
        };

        if upstream == local {
            return Ok(AheadBehind::default());
        }

        let ahead = self.count_exclusive(local, upstream, max_walk)?;
        let behind = self.count_exclusive(upstream, local, max_walk)?;

        match (ahead, behind) {
            (Some(ahead), Some(behind)) => Ok(AheadBehind::exact(ahead, behind)),
            _ => {
                log::warn!(
                    "Ahead/behind walk for {branch} exceeded {max_walk} commits, reporting unknown"
                );
                Ok(AheadBehind::unknown())
            }
        }
    }

    /// Count commits reachable from `from` but not from `stop`.
    /// Returns `None` once more than `max_walk` commits have been visited.
    fn count_exclusive(&self, from: Oid, stop: Oid, max_walk: usize) -> Result<Option<usize>> {
        let mut walk = self.repo.revwalk()?;
        walk.push(from)?;
        walk.hide(stop)?;

        let mut count = 0usize;
        for oid in walk {
            oid?;
            count += 1;
            if count > max_walk {
                return Ok(None);
            }
        }

        Ok(Some(count))
    }

    /// Add one path to the index. Handles new, modified and deleted files and
    /// whole directories.
    pub fn stage_file(&self, file: &str) -> Result<()> {
        let relative = normalize_relative(file)?;
        let git_path = to_git_path(&relative)?;
        let full_path = self.workdir()?.join(&relative);
        let mut index = self.repo.index()?;

        match std::fs::symlink_metadata(&full_path) {
            Ok(meta) if meta.is_dir() => {
                index
                    .add_all([git_path.as_str()], IndexAddOption::DEFAULT, None)
                    .map_err(classify_git_error)?;
            }
            Ok(_) => {
                index.add_path(&relative).map_err(classify_git_error)?;
            }
            Err(_) => {
                if index.get_path(&relative, 0).is_none() {
                    return Err(GitwappError::file_not_found(relative));
                }
                index.remove_path(&relative).map_err(classify_git_error)?;
            }
        }

        index.write().map_err(classify_git_error)?;
        log::debug!("Staged {git_path}");
        Ok(())
    }

    /// Reset one path's index entry to HEAD, leaving the worktree alone
    pub fn unstage_file(&self, file: &str) -> Result<()> {
        let relative = normalize_relative(file)?;
        let git_path = to_git_path(&relative)?;
        let head = self.head_commit()?;

        let in_head = head.tree()?.get_path(&relative).is_ok();
        if !in_head && !self.index_covers(&git_path)? {
            return Err(GitwappError::file_not_found(relative));
        }

        self.repo
            .reset_default(Some(head.as_object()), [git_path.as_str()])
            .map_err(classify_git_error)?;
        log::debug!("Unstaged {git_path}");
        Ok(())
    }

    /// Whether the index holds `git_path` itself or anything beneath it
    fn index_covers(&self, git_path: &str) -> Result<bool> {
        let index = self.repo.index()?;
        let prefix = format!("{git_path}/");
        Ok(index.iter().any(|entry| {
            entry.path == git_path.as_bytes() || entry.path.starts_with(prefix.as_bytes())
        }))
    }

    /// Stage every new, modified and deleted path (`git add -A`)
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .map_err(classify_git_error)?;
        index.update_all(["*"], None).map_err(classify_git_error)?;
        index.write().map_err(classify_git_error)?;
        Ok(())
    }

    /// Reset the whole index to HEAD's tree
    pub fn unstage_all(&self) -> Result<()> {
        let tree = self.head_commit()?.tree()?;
        let mut index = self.repo.index()?;
        index.read_tree(&tree).map_err(classify_git_error)?;
        index.write().map_err(classify_git_error)?;
        Ok(())
    }

    /// Commit the current index and return the new commit id.
    ///
    /// Author and committer come from git's config chain (repository, global,
    /// system). A pending merge contributes its MERGE_HEAD as second parent.
    pub fn commit(&self, message: &str) -> Result<Oid> {
        let mut index = self.repo.index()?;
        if index.has_conflicts() {
            return Err(GitwappError::MergeConflict {
                paths: conflicted_paths(&index),
            });
        }

        let tree_id = index.write_tree().map_err(classify_git_error)?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let merge_parents = if self.repo.state() == RepositoryState::Merge {
            self.read_merge_heads()?
        } else {
            Vec::new()
        };

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged && merge_parents.is_empty() {
            return Err(GitwappError::NothingToCommit);
        }

        let merge_commits = merge_parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let parents: Vec<&git2::Commit> = parent.iter().chain(merge_commits.iter()).collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(classify_git_error)?;

        if !merge_parents.is_empty() {
            self.repo.cleanup_state()?;
        }

        log::info!("Created commit {oid}");
        Ok(oid)
    }

    /// Working-copy bytes of one file, after the containment check
    pub fn read_file(&self, file: &str) -> Result<Vec<u8>> {
        let path = resolve_existing(self.workdir()?, file)?;
        if path.is_dir() {
            return Err(GitwappError::file_not_found(file));
        }
        Ok(std::fs::read(path)?)
    }

    /// Unified diff of one path between HEAD and the working copy.
    ///
    /// Untracked files have no HEAD-relative diff and are reported as
    /// `UntrackedFile`; callers decide how to present that.
    pub fn diff_file(&self, file: &str) -> Result<String> {
        let relative = normalize_relative(file)?;
        let git_path = to_git_path(&relative)?;
        let workdir = self.workdir()?;

        resolve_contained(workdir, file)?;

        let status = match self.repo.status_file(&relative) {
            Ok(status) => status,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(GitwappError::file_not_found(relative));
            }
            Err(e) => return Err(classify_git_error(e)),
        };
        if status.contains(git2::Status::WT_NEW) {
            return Err(GitwappError::untracked_file(relative));
        }

        let head_tree = self.repo.head().ok().and_then(|h| h.peel_to_tree().ok());
        let in_head = head_tree
            .as_ref()
            .map(|tree| tree.get_path(&relative).is_ok())
            .unwrap_or(false);
        if !in_head && status.is_empty() {
            return Err(GitwappError::file_not_found(relative));
        }

        let mut opts = DiffOptions::new();
        opts.pathspec(&git_path)
            .disable_pathspec_match(true)
            .ignore_submodules(true);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))?;

        let mut buf = Vec::new();
        diff.print(DiffFormat::Patch, |_, _, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                buf.push(line.origin() as u8);
            }
            buf.extend_from_slice(line.content());
            true
        })?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn read_merge_heads(&self) -> Result<Vec<Oid>> {
        let content = std::fs::read_to_string(self.repo.path().join("MERGE_HEAD"))?;
        let mut oids = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            oids.push(Oid::from_str(line)?);
        }
        Ok(oids)
    }

    pub(crate) fn head_commit(&self) -> Result<git2::Commit<'_>> {
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|_| GitwappError::NoSuchCommit)
    }
}

pub(crate) fn conflicted_paths(index: &git2::Index) -> Vec<String> {
    let mut paths = Vec::new();
    if let Ok(conflicts) = index.conflicts() {
        for conflict in conflicts.flatten() {
            let entry = conflict.our.or(conflict.their).or(conflict.ancestor);
            if let Some(entry) = entry {
                paths.push(String::from_utf8_lossy(&entry.path).into_owned());
            }
        }
    }
    paths
}
