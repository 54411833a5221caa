use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const CONFIG_DIR: &str = ".task-tracker";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Top-level project configuration loaded from `.task-tracker/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Task file settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl ProjectConfig {
    /// Load configuration from a project directory. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or validated.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", config_path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.store.ensure_valid_path()
    }

    /// Resolve the task file location. Relative paths are taken from `workdir`.
    pub fn store_path(&self, workdir: impl AsRef<Path>) -> PathBuf {
        let file = self
            .store
            .path()
            .unwrap_or_else(|| Path::new(DEFAULT_STORE_FILE));
        workdir.as_ref().join(file)
    }
}

/// `[store]` block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    path: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured task file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_valid_path(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                bail!("store.path must not be empty");
            }
            if path.file_name().is_none() {
                bail!("store.path '{}' does not name a file", path.display());
            }
        }
        Ok(())
    }
}
