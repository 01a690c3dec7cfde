//! Credential selection for push and fetch.
//!
//! libgit2 calls the credentials callback again every time the previous
//! credential is rejected. [`CredentialSession`] walks an ordered plan and
//! hands out the next strategy on each call, so a rejected key is never
//! offered twice and the callback terminates once the plan is exhausted.
//!
//! # Key Features
//! - **Scheme detection**: `ssh://` and scp-style `user@host:path` URLs use SSH,
//!   everything else goes through git's credential helper
//! - **SSH order**: agent first, then each configured key file under `~/.ssh`
//! - **Attempt log**: every strategy tried is recorded for error reporting

use crate::core::config::EngineConfig;
use git2::{Config, Cred, CredentialType};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteScheme {
    Ssh,
    Https,
    Other(String),
}

pub fn classify_remote_scheme(url: &str) -> RemoteScheme {
    if url.starts_with("ssh://") || url.starts_with("git@") {
        RemoteScheme::Ssh
    } else if url.starts_with("https://") || url.starts_with("http://") {
        RemoteScheme::Https
    } else if url.contains('@') && url.contains(':') && !url.contains("://") {
        RemoteScheme::Ssh
    } else if let Some((scheme, _)) = url.split_once("://") {
        RemoteScheme::Other(scheme.to_lowercase())
    } else {
        RemoteScheme::Other("local".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStrategy {
    SshAgent,
    SshKey(PathBuf),
    CredentialHelper,
    Default,
}

impl CredentialStrategy {
    pub fn label(&self) -> String {
        match self {
            CredentialStrategy::SshAgent => "ssh-agent".to_string(),
            CredentialStrategy::SshKey(path) => path.display().to_string(),
            CredentialStrategy::CredentialHelper => "credential helper".to_string(),
            CredentialStrategy::Default => "default credentials".to_string(),
        }
    }

    fn allowed_by(&self, allowed: CredentialType) -> bool {
        match self {
            CredentialStrategy::SshAgent | CredentialStrategy::SshKey(_) => {
                allowed.contains(CredentialType::SSH_KEY)
            }
            CredentialStrategy::CredentialHelper => {
                allowed.contains(CredentialType::USER_PASS_PLAINTEXT)
            }
            CredentialStrategy::Default => allowed.contains(CredentialType::DEFAULT),
        }
    }
}

/// Ordered strategies for a remote URL. Key files that do not exist under
/// `home` are left out.
pub fn build_credential_plan(
    scheme: &RemoteScheme,
    config: &EngineConfig,
    home: Option<&Path>,
) -> Vec<CredentialStrategy> {
    let mut plan = Vec::new();

    match scheme {
        RemoteScheme::Ssh => {
            plan.push(CredentialStrategy::SshAgent);
            if let Some(home) = home {
                for key in config.ssh_key_paths(home) {
                    if key.is_file() {
                        plan.push(CredentialStrategy::SshKey(key));
                    }
                }
            }
        }
        RemoteScheme::Https | RemoteScheme::Other(_) => {
            plan.push(CredentialStrategy::CredentialHelper);
            plan.push(CredentialStrategy::Default);
        }
    }

    plan
}

pub struct CredentialSession {
    plan: Vec<CredentialStrategy>,
    next: usize,
    attempts: Vec<String>,
    gave_up: bool,
    username: String,
    git_config: Option<Config>,
}

impl CredentialSession {
    pub fn new(plan: Vec<CredentialStrategy>, username: &str, git_config: Option<Config>) -> Self {
        Self {
            plan,
            next: 0,
            attempts: Vec::new(),
            gave_up: false,
            username: username.to_string(),
            git_config,
        }
    }

    /// Produce the next credential libgit2 may try
    pub fn next_credential(
        &mut self,
        url: &str,
        username_from_url: Option<&str>,
        allowed: CredentialType,
    ) -> std::result::Result<Cred, git2::Error> {
        let username = username_from_url.unwrap_or(&self.username).to_string();

        // SSH transports ask for the user name in a separate round first
        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(&username);
        }

        while self.next < self.plan.len() {
            let strategy = self.plan[self.next].clone();
            self.next += 1;
            if !strategy.allowed_by(allowed) {
                continue;
            }

            self.attempts.push(strategy.label());
            match self.apply(&strategy, url, username_from_url, &username) {
                Ok(cred) => {
                    log::debug!("Offering {} for {url}", strategy.label());
                    return Ok(cred);
                }
                Err(e) => log::debug!("{} unavailable: {}", strategy.label(), e.message()),
            }
        }

        self.gave_up = true;
        Err(git2::Error::from_str("no credential strategy succeeded"))
    }

    fn apply(
        &self,
        strategy: &CredentialStrategy,
        url: &str,
        username_from_url: Option<&str>,
        username: &str,
    ) -> std::result::Result<Cred, git2::Error> {
        match strategy {
            CredentialStrategy::SshAgent => Cred::ssh_key_from_agent(username),
            CredentialStrategy::SshKey(private) => {
                let public = private.with_extension("pub");
                let public = public.is_file().then_some(public);
                Cred::ssh_key(username, public.as_deref(), private, None)
            }
            CredentialStrategy::CredentialHelper => match &self.git_config {
                Some(config) => Cred::credential_helper(config, url, username_from_url),
                None => Err(git2::Error::from_str("no git config for credential helper")),
            },
            CredentialStrategy::Default => Cred::default(),
        }
    }

    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    /// True once libgit2 asked again after the last strategy and was refused
    pub fn gave_up(&self) -> bool {
        self.gave_up
    }
}
