//! Config management use case

use crate::error::Result;
use crate::infrastructure::config::CONFIG_KEYS;
use crate::infrastructure::Config;
use std::path::PathBuf;

/// Service for reading and editing the config file
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        ConfigService { path }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        Config::load_from_path(&self.path)?.get(key)
    }

    /// Set a config value and write the file
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_from_path(&self.path)?;
        config.set(key, value)?;
        config.save_to_path(&self.path)
    }

    /// All keys with their current values, in a stable order
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        let config = Config::load_from_path(&self.path)?;
        CONFIG_KEYS
            .iter()
            .map(|key| Ok((*key, config.get(key)?)))
            .collect()
    }
}
