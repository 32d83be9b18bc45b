//! # Vitrine Configuration Module
//!
//! This module provides configuration management for Vitrine, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//!
//! There is no global instance: the application loads a [`Config`] once and
//! hands an `Arc<Config>` to whoever needs it.
//!
//! ## Usage
//!
//! ```no_run
//! use vitrineconfig::Config;
//!
//! let config = Config::load_config("")?;
//! let level = config.get_log_min_level()?;
//! let cache_dir = config.get_managed_dir(&["vitrine", "cache", "directory"], "cache")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, info};

// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("vitrine.yaml");

const ENV_CONFIG_DIR: &str = "VITRINE_CONFIG";
const ENV_PREFIX: &str = "VITRINE_CONFIG__";
const CONFIG_DIR_NAME: &str = ".vitrine";

const DEFAULT_LOG_MIN_LEVEL: &str = "info";

/// Configuration manager for Vitrine
///
/// Holds the merged YAML tree (defaults, `config.yaml`, environment) and
/// writes it back to `config.yaml` whenever a value changes.
#[derive(Debug)]
pub struct Config {
    config_dir: PathBuf,
    path: PathBuf,
    data: Mutex<Value>,
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> PathBuf {
        if !directory.is_empty() {
            return PathBuf::from(directory);
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return PathBuf::from(env_path);
        }

        if Path::new(CONFIG_DIR_NAME).exists() {
            return PathBuf::from(CONFIG_DIR_NAME);
        }

        if let Some(home) = home_dir() {
            let home_config = home.join(CONFIG_DIR_NAME);
            if home_config.exists() {
                return home_config;
            }
        }

        PathBuf::from(CONFIG_DIR_NAME)
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!("{} is not a directory", path.display()));
        }

        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;

        fs::read_dir(path)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `VITRINE_CONFIG` environment variable
    /// 3. `.vitrine` in the current directory
    /// 4. `.vitrine` in the user's home directory
    ///
    /// The directory is created if it doesn't exist, and validated for
    /// read/write permissions.
    pub fn config_dir(directory: &str) -> Result<PathBuf> {
        let dir_path = Self::find_config_dir(directory);
        Self::validate_config_dir(&dir_path)?;
        Ok(dir_path)
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::config_dir(directory)?;
        info!(config_dir = %config_dir.display(), "Using config directory");

        let path = config_dir.join("config.yaml");

        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        match fs::read(&path) {
            Ok(data) => {
                info!(config_file = %path.display(), "Loaded config file");
                let external_value: Value = serde_yaml::from_slice(&data)?;
                merge_yaml(&mut default_value, &external_value);
            }
            Err(_) => {
                info!(
                    config_file = %path.display(),
                    "Config file not found, using default embedded config"
                );
            }
        }

        let mut config_value = lower_keys_value(default_value);
        apply_env_overrides(&mut config_value);

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(config_value),
        };

        config.save()?;
        Ok(config)
    }

    /// Directory holding `config.yaml`
    pub fn directory(&self) -> &Path {
        &self.config_dir
    }

    fn lock(&self) -> Result<MutexGuard<'_, Value>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("configuration lock poisoned"))
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let yaml = {
            let data = self.lock()?;
            serde_yaml::to_string(&*data)?
        };
        fs::write(&self.path, yaml)?;
        debug!(config_file = %self.path.display(), "Configuration saved");
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// `path` is an array of keys, e.g. `&["vitrine", "api", "timeout_secs"]`.
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.lock()?;
            set_value_internal(&mut data, path, value)?;
        }
        self.save()
    }

    /// Gets a configuration value at the specified path
    ///
    /// Returns an error if the path doesn't exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.lock()?;
        get_value_internal(&data, path)
    }

    /// Returns a directory managed by the configuration
    ///
    /// The directory can be absolute or relative to the configuration
    /// directory. It is created if it doesn't exist, and `default` is
    /// persisted when nothing is configured at `path`.
    pub fn get_managed_dir(&self, path: &[&str], default: &str) -> Result<PathBuf> {
        let dir_path = match self.get_value(path) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => {
                self.set_value(path, Value::String(default.to_string()))?;
                default.to_string()
            }
        };
        self.resolve_and_create_dir(&dir_path)
    }

    fn resolve_and_create_dir(&self, dir_path: &str) -> Result<PathBuf> {
        let path = Path::new(dir_path);

        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        };

        if !absolute_path.exists() {
            fs::create_dir_all(&absolute_path)?;
            info!(directory = %absolute_path.display(), "Created managed directory");
        }

        Ok(absolute_path)
    }

    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`)
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(&["host", "logger", "min_level"]) {
            Ok(Value::String(s)) => Ok(s),
            _ => Ok(DEFAULT_LOG_MIN_LEVEL.to_string()),
        }
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    if path.is_empty() {
        *data = value;
        return Ok(());
    }
    if data.is_null() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key_value = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key_value, value);
        } else {
            let entry = map
                .entry(key_value)
                .or_insert(Value::Mapping(Mapping::new()));
            set_value_internal(entry, &path[1..], value)?;
        }
        Ok(())
    } else {
        Err(anyhow!("Current node is not a map"))
    }
}

fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
    let mut current = data;
    for (i, key) in path.iter().enumerate() {
        if let Value::Mapping(map) = current {
            match map.get(Value::String(key.to_lowercase())) {
                Some(next) => current = next,
                None => return Err(anyhow!("Path {} does not exist", path[..=i].join("."))),
            }
        } else {
            return Err(anyhow!("Path {} is not a map", path[..i].join(".")));
        }
    }
    Ok(current.clone())
}

fn apply_env_overrides(config: &mut Value) {
    for (key, value) in env::vars() {
        if let Some(rest) = key.strip_prefix(ENV_PREFIX) {
            let key_path = rest.split("__").collect::<Vec<_>>();
            if let Err(e) = set_value_internal(config, &key_path, convert_env_value(&value)) {
                tracing::warn!(env_var = %key, "Ignoring environment override: {}", e);
            }
        }
    }
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                new_map.insert(key, lower_keys_value(v));
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the default.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Number;
    use tempfile::tempdir;

    fn load(dir: &Path) -> Config {
        Config::load_config(dir.to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_are_written_to_disk() {
        let dir = tempdir().unwrap();
        let config = load(dir.path());

        assert!(dir.path().join("config.yaml").exists());
        assert_eq!(
            config.get_value(&["vitrine", "rotation", "enter_ms"]).unwrap(),
            Value::Number(Number::from(800))
        );
        assert_eq!(config.get_log_min_level().unwrap(), "info");
    }

    #[test]
    fn test_external_file_is_merged() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "Vitrine:\n  Rotation:\n    Exit_ms: 650\n",
        )
        .unwrap();

        let config = load(dir.path());

        assert_eq!(
            config.get_value(&["vitrine", "rotation", "exit_ms"]).unwrap(),
            Value::Number(Number::from(650))
        );
        // Untouched keys keep their defaults
        assert_eq!(
            config.get_value(&["vitrine", "rotation", "enter_ms"]).unwrap(),
            Value::Number(Number::from(800))
        );
    }

    #[test]
    fn test_env_override() {
        let dir = tempdir().unwrap();
        env::set_var("VITRINE_CONFIG__TESTONLY__ANSWER", "42");
        let config = load(dir.path());
        env::remove_var("VITRINE_CONFIG__TESTONLY__ANSWER");

        assert_eq!(
            config.get_value(&["testonly", "answer"]).unwrap(),
            Value::Number(Number::from(42))
        );
    }

    #[test]
    fn test_set_value_persists() {
        let dir = tempdir().unwrap();
        let config = load(dir.path());
        config
            .set_value(&["vitrine", "display", "style"], Value::String("vertical".into()))
            .unwrap();

        let reloaded = load(dir.path());
        assert_eq!(
            reloaded.get_value(&["vitrine", "display", "style"]).unwrap(),
            Value::String("vertical".into())
        );
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let config = load(dir.path());
        assert!(config.get_value(&["vitrine", "nope"]).is_err());
    }

    #[test]
    fn test_managed_dir_is_relative_to_config_dir() {
        let dir = tempdir().unwrap();
        let config = load(dir.path());

        let cache = config
            .get_managed_dir(&["vitrine", "cache", "directory"], "cache")
            .unwrap();
        assert_eq!(cache, dir.path().join("cache"));
        assert!(cache.is_dir());
    }

    #[test]
    fn test_merge_yaml_replaces_scalars() {
        let mut base: Value = serde_yaml::from_str("a: {b: 1, c: 2}").unwrap();
        let ext: Value = serde_yaml::from_str("a: {c: 3, d: 4}").unwrap();
        merge_yaml(&mut base, &ext);
        let expected: Value = serde_yaml::from_str("a: {b: 1, c: 3, d: 4}").unwrap();
        assert_eq!(base, expected);
    }
}
