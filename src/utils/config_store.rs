//! ConfigStore - Local configuration files
//!
//! Loads and saves configuration as TOML or JSON, picked by file extension.
//! A missing file is not an error; it yields the default configuration.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::constants::CONFIG_FILE_NAME;
use crate::error::Result;

/// Default config file location in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "dfc", "grid-datasource")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Load a config file, falling back to defaults when it does not exist
pub fn load_config<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    let config = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Save a config file, creating parent directories as needed
pub fn save_config<T: Serialize>(path: &Path, config: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppConfig, FilterCondition, FilterOperator, SortKey, SortModel};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("grid-datasource-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_yields_default() {
        let config: AppConfig = load_config(&temp_path("missing.toml")).expect("load");
        assert_eq!(config.grid.cache_block_size, 100);
    }

    #[test]
    fn test_toml_and_json_roundtrip() {
        let mut config = AppConfig::default();
        config.grid.cache_block_size = 25;
        config.grid.default_sort = SortModel::new(vec![SortKey::desc("age")]);
        config
            .grid
            .default_filters
            .add(FilterCondition::new("age", FilterOperator::Between, 25).with_value2(40));

        for name in ["grid.toml", "grid.json"] {
            let path = temp_path(name);
            save_config(&path, &config).expect("save");
            let loaded: AppConfig = load_config(&path).expect("load");
            assert_eq!(loaded.grid, config.grid);
            let _ = fs::remove_file(&path);
        }
    }
}
