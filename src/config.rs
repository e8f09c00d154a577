use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::state::Timing;

const CONFIG_PATH: &str = ".pomo/config.toml";

/// User configuration from `~/.pomo/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Completed work sessions before a long break.
    #[serde(default = "default_sessions_per_cycle")]
    pub sessions_per_cycle: u32,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_sessions_per_cycle() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_per_cycle: default_sessions_per_cycle(),
            sound: true,
            notifications: true,
        }
    }
}

impl Config {
    pub fn timing(&self) -> Timing {
        Timing {
            work_secs: i64::from(self.work_minutes) * 60,
            short_break_secs: i64::from(self.short_break_minutes) * 60,
            long_break_secs: i64::from(self.long_break_minutes) * 60,
            sessions_per_cycle: self.sessions_per_cycle.max(1),
        }
    }
}

/// Load configuration from `.pomo/config.toml` under `home`.
///
/// Falls back to defaults if the file is missing.
pub fn load(home: &Path) -> Result<Config> {
    let path = home.join(CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}
