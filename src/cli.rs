use std::path::PathBuf;

use clap::Parser;

use pomo::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "pomo",
    about = "A minimal terminal pomodoro timer with task tracking and durable history",
    version
)]
pub struct Cli {
    /// Work phase length in minutes (overrides config).
    #[arg(long, value_name = "MINUTES")]
    pub work: Option<u32>,

    /// Short break length in minutes (overrides config).
    #[arg(long, value_name = "MINUTES")]
    pub short_break: Option<u32>,

    /// Long break length in minutes (overrides config).
    #[arg(long, value_name = "MINUTES")]
    pub long_break: Option<u32>,

    /// Work sessions before a long break (overrides config).
    #[arg(long, value_name = "N")]
    pub sessions_per_cycle: Option<u32>,

    /// Disable the phase-end alarm sound.
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications at phase boundaries.
    #[arg(long)]
    pub no_notify: bool,

    /// Directory for persisted session state. Default: ~/.pomo/state.
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
}

impl Cli {
    /// Layer CLI overrides on top of the loaded config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(minutes) = self.work {
            config.work_minutes = minutes;
        }
        if let Some(minutes) = self.short_break {
            config.short_break_minutes = minutes;
        }
        if let Some(minutes) = self.long_break {
            config.long_break_minutes = minutes;
        }
        if let Some(n) = self.sessions_per_cycle {
            config.sessions_per_cycle = n;
        }
        if self.no_sound {
            config.sound = false;
        }
        if self.no_notify {
            config.notifications = false;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["pomo", "--work", "50", "--no-sound"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.work_minutes, 50);
        assert!(!config.sound);
        assert_eq!(config.short_break_minutes, 5);
    }
}
