//! Initialize config use case

use crate::error::{DulichError, Result};
use crate::infrastructure::{Backend, Config};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write a fresh config file at `path`.
///
/// Refuses to overwrite an existing file.
pub fn init(path: &Path, backend: Backend, data_file: Option<PathBuf>) -> Result<Config> {
    if path.exists() {
        return Err(DulichError::Config(format!(
            "Config already exists at {}",
            path.display()
        )));
    }

    let mut config = Config {
        backend,
        ..Config::default()
    };
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
    config.save_to_path(path)?;
    info!("Wrote config to {}", path.display());

    println!("Initialized dulich config at {}", path.display());
    println!("Backend: {}", config.backend.as_str());
    if config.backend == Backend::Local {
        println!("Data file: {}", config.data_file_path(path).display());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dulich.toml");

        let config = init(&path, Backend::Local, Some(PathBuf::from("trips.json"))).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), config);
        assert_eq!(config.data_file, PathBuf::from("trips.json"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dulich.toml");
        init(&path, Backend::Rest, None).unwrap();

        assert!(matches!(
            init(&path, Backend::Local, None),
            Err(DulichError::Config(_))
        ));
        assert_eq!(Config::load_from_path(&path).unwrap().backend, Backend::Rest);
    }
}
