use crate::core::status::UrgencyThresholds;
use crate::core::tracker::RollbackPolicy;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".rchoreboard";
const CONFIG_NAME: &str = "rchoreboard.conf";
const DB_NAME: &str = "rchoreboard.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_chore_urgency")]
    pub chore_urgency: UrgencyThresholds,
    #[serde(default = "default_plant_urgency")]
    pub plant_urgency: UrgencyThresholds,
    /// Availability older than this is shown with a warning.
    #[serde(default = "default_stale_minutes")]
    pub stale_availability_minutes: i64,
    /// Interval of the midnight check in `today --watch`.
    #[serde(default = "default_poll_seconds")]
    pub reset_poll_seconds: u64,
    #[serde(default)]
    pub rollback_policy: RollbackPolicy,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_chore_urgency() -> UrgencyThresholds {
    UrgencyThresholds::CHORE
}
fn default_plant_urgency() -> UrgencyThresholds {
    UrgencyThresholds::PLANT
}
fn default_stale_minutes() -> i64 {
    15
}
fn default_poll_seconds() -> u64 {
    60
}

/// Top-level keys every configuration file should carry.
pub const EXPECTED_KEYS: &[&str] = &[
    "database",
    "chore_urgency",
    "plant_urgency",
    "stale_availability_minutes",
    "reset_poll_seconds",
    "rollback_policy",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            chore_urgency: default_chore_urgency(),
            plant_urgency: default_plant_urgency(),
            stale_availability_minutes: default_stale_minutes(),
            reset_poll_seconds: default_poll_seconds(),
            rollback_policy: RollbackPolicy::default(),
        }
    }
}

impl Config {
    /// `~/.rchoreboard`, or the working directory when no home is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_NAME)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_NAME)
    }

    /// Stale-availability threshold in seconds.
    pub fn stale_after_secs(&self) -> i64 {
        self.stale_availability_minutes.max(0).saturating_mul(60)
    }

    /// Midnight poll interval in seconds, at least one.
    pub fn poll_secs(&self) -> i64 {
        i64::try_from(self.reset_poll_seconds)
            .unwrap_or(i64::MAX)
            .max(1)
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Keys of [`EXPECTED_KEYS`] missing from the file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;

        Ok(EXPECTED_KEYS
            .iter()
            .copied()
            .filter(|k| value.get(*k).is_none())
            .collect())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes()).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Create the config directory, the config file (skipped in test mode)
    /// and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
