//! Configuration loading
//!
//! Settings live in a TOML file, conventionally `stencil.toml`:
//!
//! ```toml
//! [parser]
//! strict_tags = false
//!
//! [loader]
//! template_dirs = ["templates", "partials"]
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::TemplateLoader;

/// Default config file name
pub const CONFIG_FILE: &str = "stencil.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config io error on {}: {source}", path.display())]
    Io {
        /// The config file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serializing the config failed
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Options that change how the token parser behaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Reject block tags with no registered parser instead of dropping them
    #[serde(default)]
    pub strict_tags: bool,
}

impl ParserOptions {
    /// Options with strict tag checking enabled
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict_tags: true }
    }
}

/// Where included templates are looked up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directories searched in order
    #[serde(default)]
    pub template_dirs: Vec<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Parser options
    #[serde(default)]
    pub parser: ParserOptions,
    /// Loader settings
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;

        // Relative template dirs are relative to the config file
        if let Some(base) = path.parent() {
            for dir in &mut config.loader.template_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from a file, or fall back to defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a template loader from the loader section
    #[must_use]
    pub fn loader(&self) -> TemplateLoader {
        TemplateLoader::new(self.loader.template_dirs.clone()).with_options(self.parser)
    }
}
