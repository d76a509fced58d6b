use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Durations;
use crate::{plog_debug, Error, Result};

/// Startup configuration read from `~/.pomodoro/pomodoro.toml`.
///
/// This only seeds the initial state; changes made in the settings dialog
/// are never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub long_break_minutes: i64,
    /// Resume the countdown automatically after each phase change.
    pub auto_start: bool,
    /// Ring the terminal bell on phase completion.
    pub bell: bool,
    /// Show a desktop notification on phase completion.
    pub desktop_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: i64::from(Durations::DEFAULT_WORK),
            break_minutes: i64::from(Durations::DEFAULT_BREAK),
            long_break_minutes: i64::from(Durations::DEFAULT_LONG_BREAK),
            auto_start: false,
            bell: true,
            desktop_notifications: true,
        }
    }
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".pomodoro"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("pomodoro.toml"))
    }

    /// Validated phase lengths from this config.
    pub fn durations(&self) -> Result<Durations> {
        Durations::new(
            self.work_minutes,
            self.break_minutes,
            self.long_break_minutes,
        )
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        plog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            plog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.durations()?;
        plog_debug!(
            "Config loaded: work={} break={} long_break={} auto_start={} bell={} notify={}",
            config.work_minutes,
            config.break_minutes,
            config.long_break_minutes,
            config.auto_start,
            config.bell,
            config.desktop_notifications
        );
        Ok(config)
    }

    /// Write this config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                plog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        plog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}
