//! Push and pull against the configured remote.
//!
//! Both operations build fresh credential callbacks per call (see
//! [`crate::core::auth`]) and translate libgit2 failures into the typed
//! remote errors: missing remote, rejected credentials, non-fast-forward
//! and merge conflicts.

use crate::core::{
    auth::{build_credential_plan, classify_remote_scheme, CredentialSession},
    config::EngineConfig,
    dirs::get_home_directory,
    error::{classify_git_error, GitwappError, Result},
    git::{conflicted_paths, GitRepo},
    state::{PullOutcome, PushOutcome},
};
use git2::{
    build::CheckoutBuilder, AutotagOption, FetchOptions, PushOptions, Remote, RemoteCallbacks,
    RepositoryState,
};
use std::cell::RefCell;
use std::rc::Rc;

impl GitRepo {
    /// Push the current branch to `refs/heads/<branch>` on the configured remote
    pub fn push(&self, config: &EngineConfig) -> Result<PushOutcome> {
        let repo = self.get_repository();
        let remote_name = config.remote_name.as_str();
        let mut remote = self.find_remote(remote_name)?;

        let (branch, head_oid) = self.current_branch()?;
        let branch_ref = format!("refs/heads/{branch}");

        if let Some(upstream) = self.get_tracking_oid(remote_name, &branch) {
            if upstream == head_oid {
                log::info!("{remote_name}/{branch} already at {head_oid}");
                return Ok(PushOutcome::UpToDate);
            }
            if !repo.graph_descendant_of(head_oid, upstream)? {
                return Err(GitwappError::non_fast_forward(branch_ref));
            }
        }

        let session = self.credential_session(&remote, config);
        let mut callbacks = credential_callbacks(&session);

        let rejected: Rc<RefCell<Vec<(String, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let rejected_for_cb = Rc::clone(&rejected);
        callbacks.push_update_reference(move |refname, status| {
            if let Some(status) = status {
                rejected_for_cb
                    .borrow_mut()
                    .push((refname.to_string(), status.to_string()));
            }
            Ok(())
        });

        let mut push_opts = PushOptions::new();
        push_opts.remote_callbacks(callbacks);

        let refspec = format!("{branch_ref}:{branch_ref}");
        log::info!("Pushing {branch_ref} to {remote_name}");
        if let Err(err) = remote.push(&[refspec.as_str()], Some(&mut push_opts)) {
            return Err(remote_error(err, remote_name, &session.borrow()));
        }

        if let Some((refname, status)) = rejected.borrow().first() {
            log::warn!("Remote rejected {refname}: {status}");
            return Err(GitwappError::non_fast_forward(refname.clone()));
        }

        let tracking_ref = format!("refs/remotes/{remote_name}/{branch}");
        repo.reference(&tracking_ref, head_oid, true, "push: update remote-tracking ref")?;

        Ok(PushOutcome::Pushed)
    }

    /// Fetch the configured remote, then fast-forward or merge its branch into HEAD
    pub fn pull(&self, config: &EngineConfig) -> Result<PullOutcome> {
        let repo = self.get_repository();
        let remote_name = config.remote_name.as_str();
        let mut remote = self.find_remote(remote_name)?;

        if repo.state() != RepositoryState::Clean {
            let index = repo.index()?;
            return Err(GitwappError::MergeConflict {
                paths: conflicted_paths(&index),
            });
        }

        let (branch, _) = self.current_branch()?;

        let session = self.credential_session(&remote, config);
        let mut fetch_opts = FetchOptions::new();
        fetch_opts.remote_callbacks(credential_callbacks(&session));
        fetch_opts.download_tags(AutotagOption::Auto);

        log::info!("Fetching {remote_name}");
        if let Err(err) = remote.fetch(&[] as &[&str], Some(&mut fetch_opts), None) {
            return Err(remote_error(err, remote_name, &session.borrow()));
        }

        let tracking_ref = format!("refs/remotes/{remote_name}/{branch}");
        let upstream = repo
            .find_reference(&tracking_ref)
            .map_err(|_| GitwappError::NoUpstreamBranch {
                branch: branch.clone(),
            })?;
        let annotated = repo.reference_to_annotated_commit(&upstream)?;

        let (analysis, _) = repo.merge_analysis(&[&annotated])?;

        if analysis.is_up_to_date() {
            return Ok(PullOutcome::UpToDate);
        }

        if analysis.is_fast_forward() {
            let target = annotated.id();
            let target_object = repo.find_object(target, None)?;
            repo.checkout_tree(&target_object, Some(CheckoutBuilder::new().safe()))
                .map_err(classify_git_error)?;
            let mut head_ref = repo.find_reference(&format!("refs/heads/{branch}"))?;
            head_ref.set_target(target, "pull: fast-forward")?;
            log::info!("Fast-forwarded {branch} to {target}");
            return Ok(PullOutcome::FastForward);
        }

        repo.merge(&[&annotated], None, None)
            .map_err(classify_git_error)?;

        let mut index = repo.index()?;
        if index.has_conflicts() {
            let paths = conflicted_paths(&index);
            log::warn!("Pull left {} conflicted path(s)", paths.len());
            return Err(GitwappError::MergeConflict { paths });
        }

        let tree_id = index.write_tree().map_err(classify_git_error)?;
        let tree = repo.find_tree(tree_id)?;
        let signature = repo.signature()?;
        let local = self.head_commit()?;
        let theirs = repo.find_commit(annotated.id())?;
        let message = format!("Merge {remote_name}/{branch} into {branch}");

        let oid = repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &message,
                &tree,
                &[&local, &theirs],
            )
            .map_err(classify_git_error)?;
        repo.cleanup_state()?;

        log::info!("Merged {remote_name}/{branch} as {oid}");
        Ok(PullOutcome::Merged)
    }

    fn current_branch(&self) -> Result<(String, git2::Oid)> {
        let head = self
            .get_repository()
            .head()
            .map_err(|_| GitwappError::DetachedOrEmptyRepository)?;
        if !head.is_branch() {
            return Err(GitwappError::DetachedOrEmptyRepository);
        }
        self.get_head()
    }

    fn find_remote(&self, name: &str) -> Result<Remote<'_>> {
        self.get_repository().find_remote(name).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitwappError::no_remote(name)
            } else {
                GitwappError::Git(e)
            }
        })
    }

    fn credential_session(
        &self,
        remote: &Remote<'_>,
        config: &EngineConfig,
    ) -> Rc<RefCell<CredentialSession>> {
        let url = remote.pushurl().or_else(|| remote.url()).unwrap_or_default();
        let scheme = classify_remote_scheme(url);
        let home = get_home_directory();
        let plan = build_credential_plan(&scheme, config, home.as_deref());
        log::debug!("Remote {url} classified as {scheme:?}, {} strategies", plan.len());

        let git_config = self.get_repository().config().ok();
        Rc::new(RefCell::new(CredentialSession::new(
            plan,
            &config.ssh_username,
            git_config,
        )))
    }
}

fn credential_callbacks(session: &Rc<RefCell<CredentialSession>>) -> RemoteCallbacks<'static> {
    let session = Rc::clone(session);
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed| {
        session
            .borrow_mut()
            .next_credential(url, username_from_url, allowed)
    });
    callbacks
}

fn remote_error(err: git2::Error, remote: &str, session: &CredentialSession) -> GitwappError {
    if err.code() == git2::ErrorCode::Auth || session.gave_up() {
        return GitwappError::AuthenticationUnavailable {
            remote: remote.to_string(),
            attempts: session.attempts().to_vec(),
        };
    }
    // local transports report a stale remote ref without a dedicated code
    if err.message().contains("not present locally") {
        return GitwappError::non_fast_forward(err.message());
    }
    classify_git_error(err)
}
