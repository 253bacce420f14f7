//! Configuration management

use crate::error::{DulichError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dulich.toml";

pub const DEFAULT_DESTINATIONS_URL: &str = "https://67f74a7a42d6c71cca64966c.mockapi.io/Destination";
pub const DEFAULT_ITINERARIES_URL: &str = "https://67f74a7a42d6c71cca64966c.mockapi.io/Itinerary";
pub const DEFAULT_BUDGETS_URL: &str = "https://681d6a7cf74de1d219afaa71.mockapi.io/budgets";
pub const DEFAULT_DATA_FILE: &str = "dulich-data.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys accepted by `dulich config`
pub const CONFIG_KEYS: [&str; 6] = [
    "backend",
    "destinations_url",
    "itineraries_url",
    "budgets_url",
    "data_file",
    "timeout_secs",
];

/// Where collections are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Remote REST collections
    #[default]
    Rest,
    /// JSON file next to the config
    Local,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(Backend::Rest),
            "local" => Ok(Backend::Local),
            _ => Err(format!(
                "Invalid backend: '{}'. Valid backends are: rest, local",
                s
            )),
        }
    }
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Rest => "rest",
            Backend::Local => "local",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub destinations_url: String,
    pub itineraries_url: String,
    pub budgets_url: String,
    /// Local backend file; relative paths are resolved against the config file's directory
    pub data_file: PathBuf,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: Backend::default(),
            destinations_url: DEFAULT_DESTINATIONS_URL.to_string(),
            itineraries_url: DEFAULT_ITINERARIES_URL.to_string(),
            budgets_url: DEFAULT_BUDGETS_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Pick the config path: explicit flag, then DULICH_CONFIG, then ./dulich.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        std::env::var("DULICH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(DulichError::Io(e)),
        };

        toml::from_str(&contents).map_err(|e| {
            DulichError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load config and apply DULICH_BACKEND / DULICH_DATA_FILE overrides
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::load_from_path(path)?;
        if let Ok(backend) = std::env::var("DULICH_BACKEND") {
            config.backend = Backend::from_str(&backend).map_err(DulichError::Config)?;
        }
        if let Ok(data_file) = std::env::var("DULICH_DATA_FILE") {
            config.data_file = PathBuf::from(data_file);
        }
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| DulichError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Local data file resolved against the directory holding `config_path`
    pub fn data_file_path(&self, config_path: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            return self.data_file.clone();
        }
        match config_path.parent() {
            Some(dir) => dir.join(&self.data_file),
            None => self.data_file.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "backend" => Ok(self.backend.as_str().to_string()),
            "destinations_url" => Ok(self.destinations_url.clone()),
            "itineraries_url" => Ok(self.itineraries_url.clone()),
            "budgets_url" => Ok(self.budgets_url.clone()),
            "data_file" => Ok(self.data_file.display().to_string()),
            "timeout_secs" => Ok(self.timeout_secs.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend" => {
                self.backend = Backend::from_str(value).map_err(DulichError::Config)?;
            }
            "destinations_url" => self.destinations_url = parse_url(key, value)?,
            "itineraries_url" => self.itineraries_url = parse_url(key, value)?,
            "budgets_url" => self.budgets_url = parse_url(key, value)?,
            "data_file" => {
                if value.trim().is_empty() {
                    return Err(DulichError::Config("data_file must not be empty".to_string()));
                }
                self.data_file = PathBuf::from(value);
            }
            "timeout_secs" => {
                self.timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        DulichError::Config(format!(
                            "timeout_secs must be a positive number of seconds, got '{}'",
                            value
                        ))
                    })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_url(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(DulichError::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            key, value
        )))
    }
}

fn unknown_key(key: &str) -> DulichError {
    DulichError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.destinations_url, DEFAULT_DESTINATIONS_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp.path().join("dulich.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dulich.toml");
        let mut config = Config::default();
        config.backend = Backend::Local;
        config.timeout_secs = 5;

        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dulich.toml");
        fs::write(&path, "backend = \"local\"\n").unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.backend, Backend::Local);
        assert_eq!(loaded.budgets_url, DEFAULT_BUDGETS_URL);
    }

    #[test]
    fn test_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dulich.toml");
        fs::write(&path, "backend = [").unwrap();
        assert!(matches!(
            Config::load_from_path(&path),
            Err(DulichError::Config(_))
        ));
    }

    #[test]
    fn test_data_file_relative_to_config() {
        let config = Config::default();
        let path = config.data_file_path(Path::new("/srv/trips/dulich.toml"));
        assert_eq!(path, PathBuf::from("/srv/trips/dulich-data.json"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("backend", "LOCAL").unwrap();
        assert_eq!(config.get("backend").unwrap(), "local");

        config
            .set("budgets_url", "http://localhost:3000/budgets/")
            .unwrap();
        assert_eq!(
            config.get("budgets_url").unwrap(),
            "http://localhost:3000/budgets"
        );

        assert!(config.set("budgets_url", "ftp://x").is_err());
        assert!(config.set("timeout_secs", "0").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.get("colour").is_err());
    }
}
