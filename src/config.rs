use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Overrides the location of the config file.
pub const CONFIG_ENV: &str = "PISH_CONFIG";

const DEFAULT_FILE_NAME: &str = ".pish.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Printed after the working directory.
    pub prompt: String,
    pub show_cwd: bool,
    /// Forces the prompt on or off. Unset means "only when stdin is a tty".
    pub show_prompt: Option<bool>,
    pub log_dir: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "$ ".into(),
            show_cwd: true,
            show_prompt: None,
            log_dir: env::temp_dir(),
        }
    }
}

impl ShellConfig {
    /// Loads `$PISH_CONFIG`, falling back to `~/.pish.toml`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file named by `$PISH_CONFIG` is an error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        let Some(home) = env::var_os("HOME") else {
            return Ok(Self::default());
        };

        let path = Path::new(&home).join(DEFAULT_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        debug!(?config, path = %path.display(), "loaded config");

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
