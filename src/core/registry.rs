//! Registry of tracked repositories.
//!
//! Records are kept in `repositories.json` inside the data directory as a
//! pretty-printed JSON array. The file is re-read on every call so several
//! processes can share it; writes go through a temp file renamed into place.

use crate::core::error::{GitwappError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const REGISTRY_FILE: &str = "repositories.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RepositoryRecord {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "user_id", default)]
    pub owner_id: String,
}

pub struct Registry {
    file: PathBuf,
}

impl Registry {
    /// Use `dir/repositories.json`, creating `dir` if needed
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            file: dir.join(REGISTRY_FILE),
        })
    }

    pub fn list(&self) -> Result<Vec<RepositoryRecord>> {
        if !self.file.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.file)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn lookup(&self, id: &str) -> Result<RepositoryRecord> {
        self.list()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| GitwappError::not_found(id))
    }

    /// Register the working copy at `path`.
    ///
    /// The path must hold a git repository at its root. It is stored in
    /// canonical form and may be registered only once.
    pub fn add(&self, path: &Path, name: Option<&str>, owner_id: &str) -> Result<RepositoryRecord> {
        if !path.is_dir() || git2::Repository::open(path).is_err() {
            return Err(GitwappError::InvalidRepositoryPath {
                path: path.to_path_buf(),
            });
        }
        let canonical = path.canonicalize()?;

        let mut records = self.list()?;
        if records.iter().any(|record| record.path == canonical) {
            return Err(GitwappError::DuplicateRepository { path: canonical });
        }

        let name = match name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => canonical
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| canonical.display().to_string()),
        };

        let record = RepositoryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            path: canonical,
            created_at: Utc::now(),
            owner_id: owner_id.to_string(),
        };
        records.push(record.clone());
        self.save(&records)?;

        log::info!("Registered {} as {}", record.path.display(), record.id);
        Ok(record)
    }

    pub fn remove(&self, id: &str) -> Result<RepositoryRecord> {
        let mut records = self.list()?;
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| GitwappError::not_found(id))?;
        let removed = records.remove(position);
        self.save(&records)?;
        Ok(removed)
    }

    /// Replace the registry file atomically via a sibling temp file
    fn save(&self, records: &[RepositoryRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        let temp_path = self
            .file
            .with_file_name(format!(".{REGISTRY_FILE}.{}.tmp", uuid::Uuid::new_v4()));

        let written = std::fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| std::fs::rename(&temp_path, &self.file)) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}
