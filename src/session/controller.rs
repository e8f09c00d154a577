use thiserror::Error;

use super::state::{Phase, Session, Timing};

/// Validation errors surfaced to the user on `start`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("describe the task for this pomodoro before starting")]
    EmptyTaskDescription,
}

/// What the event loop must do after a tick.
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while not running (stale after a cancel); nothing changed.
    Ignored,
    /// Countdown continues.
    Running,
    /// The phase just ended; side effects and persistence are due.
    PhaseEnded(PhaseEnd),
}

/// Details of a phase boundary, consumed by the notifier and renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseEnd {
    pub finished: Phase,
    pub next: Phase,
    /// Task of the finished work session (work phase endings only).
    pub task: Option<String>,
}

impl PhaseEnd {
    /// Notification body describing the phase that just ended.
    pub fn message(&self) -> String {
        match self.finished {
            Phase::Work => {
                let task = self.task.as_deref().unwrap_or("Work");
                format!("Pomodoro \"{task}\" completed! Time for a break.")
            }
            Phase::ShortBreak => "Short break over! Ready for the next pomodoro.".to_string(),
            Phase::LongBreak => "Long break over! Back to work.".to_string(),
        }
    }
}

/// Drives the work/break cycle. Owns the session; all mutations flow
/// through `start`/`pause`/`tick`/`reset`. Pure of side effects — the
/// caller renders, persists, and rings alarms based on the returned values.
pub struct Controller {
    session: Session,
    timing: Timing,
}

impl Controller {
    pub fn new(timing: Timing) -> Self {
        Self {
            session: Session::new(timing),
            timing,
        }
    }

    pub fn with_session(timing: Timing, session: Session) -> Self {
        Self { session, timing }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Set the task description for the upcoming work session.
    pub fn set_task_description(&mut self, text: &str) {
        self.session.current_task_description = text.trim().to_string();
    }

    /// Stage a title to insert as a heading before the next work entry.
    pub fn stage_title(&mut self, text: &str) {
        self.session.pending_overall_title = text.trim().to_string();
    }

    /// Start (or resume) the countdown. No-op while already running.
    ///
    /// Starting a work phase requires a non-empty task description; on
    /// success it appends the pending title (if any) and a current work
    /// entry. Returns `Ok(false)` for the running no-op.
    pub fn start(&mut self) -> Result<bool, StartError> {
        if self.session.running {
            return Ok(false);
        }

        if self.session.phase == Phase::Work {
            if self.session.current_task_description.trim().is_empty() {
                return Err(StartError::EmptyTaskDescription);
            }
            // A work entry only appears once per phase: resuming after a
            // pause must not append a duplicate.
            if self.session.current_entry().is_none() {
                let title = std::mem::take(&mut self.session.pending_overall_title);
                if !title.trim().is_empty() {
                    self.session.push_title(title.trim());
                }
                let task = self.session.current_task_description.clone();
                self.session.push_work_entry(&task);
            }
        } else {
            self.session.current_task_description.clear();
        }

        self.session.running = true;
        Ok(true)
    }

    /// Pause the countdown, preserving remaining time exactly.
    /// Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if !self.session.running {
            return false;
        }
        self.session.running = false;
        true
    }

    /// Apply one one-second tick. When the countdown passes below zero the
    /// phase ends: the current work entry is completed and the session count
    /// bumped (work endings only), then the phase transition runs and the
    /// session stops until the user explicitly resumes.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.session.running {
            return TickOutcome::Ignored;
        }

        self.session.remaining_seconds -= 1;
        if self.session.remaining_seconds >= 0 {
            return TickOutcome::Running;
        }

        let finished = self.session.phase;
        let task = (finished == Phase::Work)
            .then(|| self.session.current_task_description.clone())
            .filter(|t| !t.is_empty());

        if finished == Phase::Work {
            self.session.complete_current_entry();
            self.session.completed_work_sessions += 1;
        }

        let next = self.advance_phase();
        TickOutcome::PhaseEnded(PhaseEnd {
            finished,
            next,
            task,
        })
    }

    /// Restore defaults: fresh stopped work phase, empty list, zero count.
    pub fn reset(&mut self) {
        self.session = Session::new(self.timing);
    }

    /// Move to the next phase per the cadence rule, resetting the countdown
    /// and stopping the clock. The count was already bumped by `tick`, so a
    /// long break follows when it is a positive multiple of the cadence.
    fn advance_phase(&mut self) -> Phase {
        let next = match self.session.phase {
            Phase::Work => {
                let n = self.session.completed_work_sessions;
                if n > 0 && n % self.timing.sessions_per_cycle == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.session.phase = next;
        self.session.remaining_seconds = self.timing.duration_for(next);
        self.session.running = false;
        self.session.current_task_description.clear();
        next
    }
}
