use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::ConfigError;
use crate::storage::json_backend::write_atomic;
use crate::utils::{app_data_dir, DEFAULT_LOG_FILTER};

const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "loanbook.json";
const TMP_SUFFIX: &str = "tmp";

/// Order in which a mutating command touches memory and disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistencePolicy {
    /// Mutate the live model, then save. A failed save leaves memory ahead of disk.
    #[default]
    MutateThenPersist,
    /// Run on a copy, save the copy, and only then swap it in.
    PersistThenCommit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub enabled_features: Vec<String>,
    pub persistence_policy: PersistencePolicy,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            enabled_features: Vec::new(),
            persistence_policy: PersistencePolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.enabled_features.iter().any(|enabled| enabled == feature)
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = base.join(CONFIG_FILE);
        Self { base, path }
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Data file named by `config`, or `<base>/loanbook.json`. Relative paths
    /// are taken relative to the base directory.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        match &config.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => self.base.join(DATA_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
