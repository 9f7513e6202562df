use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for config file operations
#[derive(Debug)]
pub enum ConfigError {
    /// Could not determine the platform config directory
    NoConfigDir,
    /// Reading or writing the config file failed
    Io(std::io::Error),
    /// The config file is not valid TOML
    Parse(String),
    /// Serializing the config to TOML failed
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "Config IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "Invalid config file: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Failed to serialize config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Override for the peer script location; defaults to the script
    /// shipped with the bridge crate when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_path: Option<String>,
    /// Override for the virtual environment root activated before the
    /// peer script loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venv_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
}

impl Config {
    /// Resolve the config file path.
    ///
    /// `PEERFN_CONFIG` takes precedence when set and non-empty, so tests and
    /// isolated runs can point at their own file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var("PEERFN_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(base.join("peerfn").join("peerfn.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path; a missing file yields the default config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| ConfigError::Parse(format!("{}", e)))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(format!("{}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "script-path" => self.script_path.clone(),
            "venv-path" => self.venv_path.clone(),
            "python-version" => self.python_version.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "script-path" => self.script_path = Some(value),
            "venv-path" => self.venv_path = Some(value),
            "python-version" => self.python_version = Some(value),
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.script_path.is_none() && self.venv_path.is_none() && self.python_version.is_none()
    }
}
