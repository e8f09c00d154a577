use serde::{Deserialize, Serialize};

/// Countdown phase. Governs the duration and whether a task description
/// is required to start.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human-readable phase name for the status line and notifications.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
        }
    }
}

/// Phase durations and long-break cadence, in seconds.
///
/// Defaults match the classic cycle: 25 minute work blocks, 5 minute short
/// breaks, a 15 minute long break after every 3rd completed work session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub work_secs: i64,
    pub short_break_secs: i64,
    pub long_break_secs: i64,
    /// Completed work sessions between long breaks.
    pub sessions_per_cycle: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            sessions_per_cycle: 3,
        }
    }
}

impl Timing {
    pub fn duration_for(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

/// Kind of an entry in the session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A heading staged via the overall-title input.
    Title,
    /// A single work session.
    WorkEntry,
}

/// A persisted, ordered entry in the session list. Entries are append-only;
/// the list is cleared only by a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: u64,
    pub kind: ItemKind,
    pub text: String,
    pub completed: bool,
}

impl ListItem {
    /// A work entry whose phase is still in progress.
    pub fn is_current(&self) -> bool {
        self.kind == ItemKind::WorkEntry && !self.completed
    }
}

/// Accumulated pomodoro session state. One instance per running app.
#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    /// Seconds left in the active phase. Decremented once per tick while
    /// running; dips to -1 only transiently inside the tick that ends a phase.
    pub remaining_seconds: i64,
    pub running: bool,
    pub completed_work_sessions: u32,
    /// Task for the work phase in progress. Required non-empty to start work.
    pub current_task_description: String,
    /// Label staged for insertion as a heading before the next work entry.
    pub pending_overall_title: String,
    pub items: Vec<ListItem>,
    next_item_id: u64,
}

impl Session {
    pub fn new(timing: Timing) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: timing.work_secs,
            running: false,
            completed_work_sessions: 0,
            current_task_description: String::new(),
            pending_overall_title: String::new(),
            items: Vec::new(),
            next_item_id: 1,
        }
    }

    /// Rebuild a session from persisted state. The restored session is
    /// always a stopped, fresh work phase; remaining time is not persisted.
    pub fn restored(
        timing: Timing,
        items: Vec<ListItem>,
        completed_work_sessions: u32,
        pending_overall_title: String,
    ) -> Self {
        let next_item_id = items.iter().map(|i| i.id + 1).max().unwrap_or(1);
        Self {
            completed_work_sessions,
            pending_overall_title,
            items,
            next_item_id,
            ..Self::new(timing)
        }
    }

    /// Ordinal of the next work session, for the task input prompt.
    pub fn next_ordinal(&self) -> u32 {
        self.completed_work_sessions + 1
    }

    /// The work entry for the phase in progress, if any.
    pub fn current_entry(&self) -> Option<&ListItem> {
        self.items.iter().rev().find(|i| i.is_current())
    }

    /// Append a title heading.
    pub fn push_title(&mut self, text: &str) {
        let item = ListItem {
            id: self.take_id(),
            kind: ItemKind::Title,
            text: text.to_string(),
            completed: false,
        };
        self.items.push(item);
    }

    /// Append a work entry as current, demoting any previous current entry
    /// to completed. Keeps the at-most-one-current invariant.
    pub fn push_work_entry(&mut self, text: &str) {
        for item in &mut self.items {
            if item.is_current() {
                item.completed = true;
            }
        }
        let item = ListItem {
            id: self.take_id(),
            kind: ItemKind::WorkEntry,
            text: text.to_string(),
            completed: false,
        };
        self.items.push(item);
    }

    /// Mark the current work entry completed. Returns false if there is none.
    pub fn complete_current_entry(&mut self) -> bool {
        for item in self.items.iter_mut().rev() {
            if item.is_current() {
                item.completed = true;
                return true;
            }
        }
        false
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_stopped_work_phase() {
        let session = Session::new(Timing::default());
        assert_eq!(session.phase, Phase::Work);
        assert_eq!(session.remaining_seconds, 1500);
        assert!(!session.running);
        assert_eq!(session.completed_work_sessions, 0);
        assert!(session.items.is_empty());
    }

    #[test]
    fn push_work_entry_demotes_previous_current() {
        let mut session = Session::new(Timing::default());
        session.push_work_entry("first");
        session.push_work_entry("second");

        let current: Vec<_> = session.items.iter().filter(|i| i.is_current()).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].text, "second");
        assert!(session.items[0].completed);
    }

    #[test]
    fn complete_current_entry_leaves_none_current() {
        let mut session = Session::new(Timing::default());
        session.push_title("morning");
        session.push_work_entry("write report");

        assert!(session.complete_current_entry());
        assert!(session.current_entry().is_none());
        // Titles are never "current" and never completed by this path.
        assert_eq!(session.items[0].kind, ItemKind::Title);
        assert!(!session.items[0].completed);

        assert!(!session.complete_current_entry());
    }

    #[test]
    fn restored_session_continues_item_ids() {
        let items = vec![
            ListItem {
                id: 3,
                kind: ItemKind::WorkEntry,
                text: "old".into(),
                completed: true,
            },
            ListItem {
                id: 7,
                kind: ItemKind::Title,
                text: "afternoon".into(),
                completed: false,
            },
        ];
        let mut session = Session::restored(Timing::default(), items, 2, "block".into());
        assert_eq!(session.next_ordinal(), 3);
        assert_eq!(session.pending_overall_title, "block");

        session.push_work_entry("new");
        assert_eq!(session.items.last().unwrap().id, 8);
    }
}
