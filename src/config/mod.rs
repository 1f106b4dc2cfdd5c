use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::zone::Zone;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "RWORKLOG_HOME";

const FIELDS: [&str; 3] = ["data_file", "admin_role", "timezone"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_data_file() -> String {
    Config::data_file_path().to_string_lossy().to_string()
}
fn default_admin_role() -> String {
    "Admin".to_string()
}
fn default_timezone() -> String {
    "local".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            admin_role: default_admin_role(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV) {
            return expand_tilde(&dir);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworklog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rworklog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Return the default path of the JSON data file
    pub fn data_file_path() -> PathBuf {
        Self::config_dir().join("timeData.json")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Fields missing from the file take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Field names absent from the on-disk file (empty when the file is
    /// missing: nothing to repair, defaults apply).
    pub fn missing_fields() -> AppResult<Vec<&'static str>> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let yaml: Value = serde_yaml::from_str(&content)?;
        let map = yaml.as_mapping();

        Ok(FIELDS
            .iter()
            .copied()
            .filter(|f| !map.is_some_and(|m| m.contains_key(*f)))
            .collect())
    }

    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_file)
    }

    pub fn zone(&self) -> AppResult<Zone> {
        Zone::parse(&self.timezone)
    }
}
