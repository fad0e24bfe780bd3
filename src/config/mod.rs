use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "SQLITE_DB_PATH";
pub const ENV_OFFICE_SSID: &str = "OFFICE_WIFI_SSID";

/// Upper bound for the office check interval: one day.
pub const MAX_CHECK_INTERVAL_MINUTES: u64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Network name that marks the office; empty disables detection.
    #[serde(default)]
    pub office_ssid: String,
    #[serde(default = "default_check_interval")]
    pub check_interval_minutes: u64,
    /// Overrides the platform Wi-Fi scan command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_command: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_check_interval() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            office_ssid: String::new(),
            check_interval_minutes: default_check_interval(),
            scan_command: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("wfhtracker")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".wfhtracker")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("wfhtracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("wfhtracker.sqlite")
    }

    /// Directory holding `config_path`, the platform default otherwise.
    pub fn config_dir_of(config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Self::config_dir(),
        }
    }

    /// Resolve a `--db` value: `~` is expanded and a relative name is
    /// placed inside `config_dir`.
    pub fn resolve_db(config_dir: &Path, raw: &str) -> String {
        let p = expand_tilde(raw);
        let db_path = if p.is_absolute() { p } else { config_dir.join(p) };
        db_path.to_string_lossy().to_string()
    }

    /// Office check interval, rejected outside `1..=MAX_CHECK_INTERVAL_MINUTES`.
    pub fn check_interval(minutes: u64) -> AppResult<Duration> {
        if !(1..=MAX_CHECK_INTERVAL_MINUTES).contains(&minutes) {
            return Err(AppError::Config(format!(
                "check interval must be between 1 and {MAX_CHECK_INTERVAL_MINUTES} minutes, got {minutes}"
            )));
        }
        Ok(Duration::from_secs(minutes * 60))
    }

    /// Load the configuration file (defaults when missing), then apply the
    /// environment overrides.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut cfg = Self::load_file(path)?;
        cfg.apply_env_from(|key| env::var(key).ok());
        Ok(cfg)
    }

    pub fn load_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| AppError::ConfigLoad(e.to_string()))?;
        let cfg: Self =
            serde_yaml::from_str(&content).map_err(|e| AppError::ConfigLoad(e.to_string()))?;
        Self::check_interval(cfg.check_interval_minutes)?;
        Ok(cfg)
    }

    /// Environment overrides; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            self.database = db;
        }
        if let Some(ssid) = lookup(ENV_OFFICE_SSID).filter(|v| !v.trim().is_empty()) {
            self.office_ssid = ssid;
        }
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        file.write_all(yaml.as_bytes())
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        Ok(())
    }

    /// Create the configuration directory and file.
    ///
    /// `custom_db` must already be resolved with [`Config::resolve_db`].
    pub fn init_all(
        config_path: &Path,
        custom_db: Option<&str>,
        is_test: bool,
    ) -> AppResult<Self> {
        fs::create_dir_all(Self::config_dir_of(config_path))?;

        let mut config = Self::load_file(config_path)?;

        if let Some(db) = custom_db {
            config.database = db.to_string();
        }

        if !is_test {
            config.save(config_path)?;
        }

        Ok(config)
    }
}
