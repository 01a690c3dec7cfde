//! Centralized initialization for repository commands.
//!
//! Every subcommand that works on a registered repository needs the same
//! setup: open the registry, load the engine configuration and resolve the
//! repository id to a path. [`CommandContext`] does that once in `main` and
//! is passed to the `execute_*` functions.
//!
//! # Public API
//! - [`CommandContext`]: registry plus engine, with id resolution
//!
//! # Initialization Steps
//! 1. **Data directory**: `--data-dir` or the per-user data directory
//! 2. **Registry**: `repositories.json` inside that directory
//! 3. **Engine**: `config.json` from the config directory, or defaults

use crate::core::{
    config::EngineConfig,
    dirs::get_data_directory,
    engine::Engine,
    error::Result,
    registry::{Registry, RepositoryRecord},
};
use std::path::{Path, PathBuf};

pub struct CommandContext {
    pub registry: Registry,
    pub engine: Engine,
}

impl CommandContext {
    /// Build the context from CLI options
    ///
    /// # Examples
    /// ```no_run
    /// use gitwapp::core::command_init::CommandContext;
    ///
    /// let context = CommandContext::initialize(None)?;
    /// let record = context.resolve("0b6d5c9e-0000-4000-8000-000000000000")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn initialize(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => get_data_directory()?,
        };
        log::debug!("Using data directory {}", data_dir.display());

        let config = EngineConfig::load()?;
        Self::with_config(&data_dir, config)
    }

    pub fn with_config(data_dir: &Path, config: EngineConfig) -> Result<Self> {
        Ok(Self {
            registry: Registry::open(data_dir)?,
            engine: Engine::new(config),
        })
    }

    pub fn resolve(&self, id: &str) -> Result<RepositoryRecord> {
        self.registry.lookup(id)
    }

    pub fn resolve_path(&self, id: &str) -> Result<PathBuf> {
        Ok(self.resolve(id)?.path)
    }
}
