//! TOML-based application configuration.
//!
//! Stores:
//! - The daily routine (`[profile]`)
//! - Scheduling defaults
//! - Which task store and ranking oracle to use
//!
//! Configuration is stored at `~/.config/goaltrack/config.toml`. Secrets
//! never go in this file; see [`crate::integrations::Credential`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::profile::UserProfile;
use crate::task::TaskCategory;

/// Shortest and longest activity the scheduler accepts, in minutes.
pub const MIN_ACTIVITY_MINUTES: u32 = 15;
pub const MAX_ACTIVITY_MINUTES: u32 = 180;

/// Scheduling defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Minimum slot length shown by the day overview.
    #[serde(default = "default_overview_min")]
    pub overview_min_minutes: u32,
    #[serde(default = "default_duration")]
    pub default_duration: u32,
    #[serde(default)]
    pub default_category: TaskCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    Notion,
    File,
}

/// Task store selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub provider: StoreProvider,
    /// JSON task file used by the `file` provider.
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default = "default_notion_base_url")]
    pub notion_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    #[default]
    Cohere,
    Heuristic,
    None,
}

/// Ranking oracle selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub provider: OracleProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_cohere_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/goaltrack/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
}

// Default functions
fn default_overview_min() -> u32 {
    30
}
fn default_duration() -> u32 {
    60
}
fn default_notion_base_url() -> String {
    crate::integrations::notion::DEFAULT_BASE_URL.into()
}
fn default_cohere_base_url() -> String {
    crate::ranking::cohere::DEFAULT_BASE_URL.into()
}
fn default_model() -> String {
    crate::ranking::cohere::DEFAULT_MODEL.into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            overview_min_minutes: default_overview_min(),
            default_duration: default_duration(),
            default_category: TaskCategory::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::default(),
            file_path: None,
            notion_base_url: default_notion_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::default(),
            model: default_model(),
            base_url: default_cohere_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `config.toml` inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Profile invariants plus the scheduling bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.profile.validate()?;
        let duration = self.scheduling.default_duration;
        if !(MIN_ACTIVITY_MINUTES..=MAX_ACTIVITY_MINUTES).contains(&duration) {
            return Err(ValidationError::OutOfRange {
                field: "scheduling.default_duration".into(),
                value: duration as i64,
                min: MIN_ACTIVITY_MINUTES as i64,
                max: MAX_ACTIVITY_MINUTES as i64,
            });
        }
        for (field, secs) in [
            ("store.timeout_secs", self.store.timeout_secs),
            ("oracle.timeout_secs", self.oracle.timeout_secs),
        ] {
            if secs == 0 || secs > 300 {
                return Err(ValidationError::OutOfRange {
                    field: field.into(),
                    value: secs as i64,
                    min: 1,
                    max: 300,
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// The change is only applied if the resulting configuration still
    /// deserializes and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Every leaf key with its current value, in dot-path form.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                serde_json::Value::Null => out.push((prefix.to_string(), String::new())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("wake_time = \"07:00\""));
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.scheduling.overview_min_minutes, 30);
        assert_eq!(cfg.scheduling.default_duration, 60);
        assert_eq!(cfg.scheduling.default_category, TaskCategory::Personal);
        assert_eq!(cfg.store.provider, StoreProvider::Notion);
        assert_eq!(cfg.store.notion_base_url, "https://api.notion.com");
        assert_eq!(cfg.oracle.provider, OracleProvider::Cohere);
        assert_eq!(cfg.oracle.model, "command-r-08-2024");
        assert_eq!(cfg.oracle.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("profile.wake_time").as_deref(), Some("07:00"));
        assert_eq!(cfg.get("scheduling.default_duration").as_deref(), Some("60"));
        assert_eq!(cfg.get("oracle.provider").as_deref(), Some("cohere"));
        assert_eq!(cfg.get("store.file_path").as_deref(), Some(""));
        assert!(cfg.get("profile.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("profile.wake_time", "06:15").unwrap();
        cfg.apply("profile.commute_to_work", "45").unwrap();
        cfg.apply("oracle.provider", "heuristic").unwrap();
        cfg.apply("store.file_path", "/tmp/tasks.json").unwrap();
        cfg.apply(
            "profile.high_energy_periods",
            r#"[{"start": "08:00", "end": "10:00"}]"#,
        )
        .unwrap();

        assert_eq!(cfg.profile.wake_time, NaiveTime::from_hms_opt(6, 15, 0).unwrap());
        assert_eq!(cfg.profile.commute_to_work, 45);
        assert_eq!(cfg.oracle.provider, OracleProvider::Heuristic);
        assert_eq!(cfg.store.file_path.as_deref(), Some("/tmp/tasks.json"));
        assert_eq!(cfg.profile.high_energy_periods.len(), 1);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("profile.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.apply("nope.deeper", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_invalid_values_and_keeps_old_state() {
        let mut cfg = Config::default();
        assert!(cfg.apply("profile.commute_to_work", "soon").is_err());
        assert!(cfg.apply("profile.wake_time", "7am").is_err());
        assert!(cfg.apply("oracle.provider", "gpt").is_err());
        // Valid syntax, but wake would come after sleep.
        assert!(matches!(
            cfg.apply("profile.wake_time", "23:30"),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "profile.sleep_time"
        ));
        assert!(cfg.apply("profile.commute_from_work", "121").is_err());
        assert!(cfg.apply("scheduling.default_duration", "5").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_reads_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[profile]
wake_time = "06:00"

[oracle]
provider = "none"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.profile.wake_time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(cfg.profile.sleep_time, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(cfg.oracle.provider, OracleProvider::None);
        assert_eq!(cfg.store.provider, StoreProvider::Notion);
    }

    #[test]
    fn load_from_rejects_invalid_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[profile]\nwake_time = \"23:00\"\nsleep_time = \"07:00\"\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn save_to_then_load_from_preserves_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("scheduling.overview_min_minutes", "45").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn entries_lists_leaf_keys() {
        let entries = Config::default().entries();
        assert!(entries.contains(&("profile.wake_time".to_string(), "07:00".to_string())));
        assert!(entries.contains(&("oracle.model".to_string(), "command-r-08-2024".to_string())));
        let periods = entries
            .iter()
            .find(|(k, _)| k == "profile.high_energy_periods")
            .map(|(_, v)| serde_json::from_str::<serde_json::Value>(v).unwrap());
        assert_eq!(
            periods,
            Some(serde_json::json!([{ "start": "09:00", "end": "11:30" }]))
        );
    }
}
