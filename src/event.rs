/// Unified application event consumed by the main event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One-second tick from the clock task. The generation is checked
    /// against the live clock so stale ticks are dropped.
    Tick { generation: u64 },
    /// A terminal event (key press, resize) from the crossterm stream.
    Terminal(crossterm::event::Event),
}

/// Which text input the line editor currently targets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Task description for the next work session (required to start work).
    #[default]
    Task,
    /// Overall title staged as a list heading before the next work entry.
    Title,
}

impl InputField {
    pub fn label(self) -> &'static str {
        match self {
            InputField::Task => "task",
            InputField::Title => "title",
        }
    }
}
