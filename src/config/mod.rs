//! Tool configuration
//!
//! Settings are merged from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. Config file (.promote.toml)
//! 3. CLI flags

mod defaults;

pub use defaults::{
    DEFAULT_ARTIFACT_TYPE, DEFAULT_BUILD_DIRECTORY, DEFAULT_COMMENT, DEFAULT_CONFIG_FILE,
    DEFAULT_PROJECT_FILE,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Effective configuration for writing the promotable artifacts file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromoteConfig {
    /// Header comment of the properties file
    pub comment: String,

    /// Store artifact files relative to the build directory.
    /// When false, absolute paths are written.
    pub relative_paths: bool,
}

impl Default for PromoteConfig {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
            relative_paths: true,
        }
    }
}

/// Values given on the command line (layer 3)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub comment: Option<String>,
    pub absolute_paths: bool,
}

impl PromoteConfig {
    /// Load and parse config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse config from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Resolve the file layer.
    ///
    /// An explicit path must exist. Without one, the default file is used
    /// when present and the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply CLI flags on top of this config
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(comment) = &overrides.comment {
            self.comment = comment.clone();
        }
        if overrides.absolute_paths {
            self.relative_paths = false;
        }
        self
    }
}
