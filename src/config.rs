//! Dashboard Configuration
//! Optional `dashboard.json` overrides for paths, defaults and view sizes.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE: &str = "dashboard.json";
pub const DEFAULT_DATA_FILE: &str = "final_renewables_dataset.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub default_year: i32,
    pub default_country: String,
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    pub views: ViewSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            default_year: 2023,
            default_country: "World".to_string(),
            title: "🌍 Global Renewable Energy Trends Dashboard".to_string(),
            subtitle: "A comprehensive look at renewable energy capacity, GDP, and population dynamics across the globe.".to_string(),
            footer: "Global Renewable Energy Dashboard | Data: per-country renewable capacity statistics".to_string(),
            views: ViewSettings::default(),
        }
    }
}

/// Knobs for the derived views.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Entity that sums all countries; excluded from cross-country views.
    pub aggregate_entity: String,
    pub growth_size: usize,
    pub leaderboard_size: usize,
    pub comparison_size: usize,
    /// (earlier, later) years of the historical comparison.
    pub comparison_years: (i32, i32),
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            aggregate_entity: "World".to_string(),
            growth_size: 5,
            leaderboard_size: 10,
            comparison_size: 10,
            comparison_years: (2010, 2023),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.views.comparison_years, (2010, 2023));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "default_year": 2020, "views": { "leaderboard_size": 5 } }"#,
        )
        .unwrap();

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.default_year, 2020);
        assert_eq!(config.views.leaderboard_size, 5);
        assert_eq!(config.views.aggregate_entity, "World");
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::load_or_default(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
