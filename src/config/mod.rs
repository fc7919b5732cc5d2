use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Generator configuration stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Project root that platform paths are resolved against.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Directory for the vector set, relative to `output_root`.
    #[serde(default = "default_vector_dir")]
    pub vector_dir: PathBuf,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_vector_dir() -> PathBuf {
    PathBuf::from("assets/icon")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            vector_dir: default_vector_dir(),
        }
    }
}

impl AppConfig {
    /// Default config file path: ~/.config/plateicon/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plateicon");
        config_dir.join("config.toml")
    }

    /// Load config from an explicit file. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &contents)
    }

    /// Load config from the default path, or return defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring config: {}", e),
            }
        }
        Self::default()
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute-or-relative directory the vector set is written to.
    pub fn vector_output_dir(&self) -> PathBuf {
        self.output_root.join(&self.vector_dir)
    }
}
