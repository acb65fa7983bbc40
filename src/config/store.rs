//! Persistent storage for the configuration document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WanpcError};

use super::schema::ConfigDocument;

/// Directory under the user's home that holds wanpc state.
pub const CONFIG_DIR_NAME: &str = ".wanpc";

/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Reads and writes the configuration document at a fixed location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.wanpc/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            WanpcError::Other(anyhow::anyhow!("Could not determine home directory"))
        })?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Store at an explicit path if given, otherwise at the default location.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the backing file in bytes, if it exists.
    pub fn size(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Load the document.
    ///
    /// A missing file yields an empty document; unparseable content is a
    /// [`WanpcError::ConfigParseError`].
    pub fn load(&self) -> Result<ConfigDocument> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, starting empty", self.path.display());
            return Ok(ConfigDocument::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| WanpcError::ConfigParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let document: ConfigDocument =
            toml::from_str(&content).map_err(|e| WanpcError::ConfigParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded {} template(s) and {} global default(s) from {}",
            document.templates.len(),
            document.global_defaults.len(),
            self.path.display()
        );
        Ok(document)
    }

    /// Save the document using an atomic write.
    ///
    /// The content is written to a sibling temp file and renamed over the
    /// target, so the document is never left half-written.
    pub fn save(&self, document: &ConfigDocument) -> Result<()> {
        let write_err = |message: String| WanpcError::ConfigWriteError {
            path: self.path.clone(),
            message,
        };

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| write_err(e.to_string()))?;
            }
        }

        let content = toml::to_string_pretty(document).map_err(|e| write_err(e.to_string()))?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| write_err(e.to_string()))?;
        fs::rename(&temp_path, &self.path).map_err(|e| write_err(e.to_string()))?;

        tracing::debug!("Saved config to {}", self.path.display());
        Ok(())
    }
}
