//! Phase-boundary side channels: desktop notification and alarm sound.
//!
//! Both are strictly best-effort. A missing notification daemon or sound
//! player is logged and otherwise ignored; nothing here can fail the app.

use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use notify_rust::Notification;

use crate::session::controller::PhaseEnd;

/// Candidate system sound players, tried in order.
const ALARM_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/prompt.wav"),
];

pub struct Notifier {
    sound: bool,
    notifications: bool,
}

impl Notifier {
    pub fn new(sound: bool, notifications: bool) -> Self {
        Self {
            sound,
            notifications,
        }
    }

    /// Fire the configured side effects for a phase boundary.
    pub fn phase_ended(&self, end: &PhaseEnd) {
        if self.notifications {
            if let Err(err) = Notification::new()
                .summary("Pomodoro")
                .body(&end.message())
                .appname("pomo")
                .icon("alarm-clock")
                .show()
            {
                tracing::debug!(error = %err, "desktop notification failed");
            }
        }
        if self.sound {
            play_alarm();
        }
    }
}

/// Fire-and-forget alarm playback on a detached thread, falling back to the
/// terminal bell when no system player is available.
fn play_alarm() {
    std::thread::spawn(|| {
        for (player, file) in ALARM_CANDIDATES {
            if !Path::new(file).exists() {
                continue;
            }
            match Command::new(player)
                .arg(file)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(_) => return,
                Err(err) => {
                    tracing::debug!(player, error = %err, "alarm playback failed");
                }
            }
        }
        let mut out = std::io::stdout();
        out.write_all(b"\x07").ok();
        out.flush().ok();
    });
}
