use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use super::theme;
use crate::event::InputField;
use crate::session::controller::PhaseEnd;
use crate::session::state::{ItemKind, Phase, Session};

/// Format remaining seconds as `mm:ss`, clamping negatives to zero.
pub fn format_mmss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Produces colored raw-mode terminal output for the timer, the session
/// list, and the prompt lines. Line-oriented: the status line is redrawn
/// in place; everything else scrolls.
pub struct Renderer<W: Write = io::Stdout> {
    out: W,
    /// Fixed width override for tests; live renderers query the terminal.
    width: Option<usize>,
}

impl Default for Renderer<io::Stdout> {
    fn default() -> Self {
        Self {
            out: io::stdout(),
            width: None,
        }
    }
}

impl Renderer<io::Stdout> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Write> Renderer<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            out: writer,
            width: Some(80),
        }
    }

    pub fn render_help(&mut self) {
        let help = "space play/pause · type a task, Enter starts · Tab stages a title · \
                    Ctrl+R reset · Ctrl+D quit";
        queue!(self.out, Print(theme::dim().apply(help)), Print("\r\n")).ok();
        self.out.flush().ok();
    }

    /// Redraw the status line in place: `mm:ss · phase ▶ task`.
    pub fn render_status(&mut self, session: &Session) {
        let phase_style = match session.phase {
            Phase::Work => theme::phase_work(),
            Phase::ShortBreak | Phase::LongBreak => theme::phase_break(),
        };
        let indicator = if session.running { "▶" } else { "⏸" };
        let tail = self.status_tail(session);

        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::CurrentLine),
            Print(theme::timer().apply(format_mmss(session.remaining_seconds))),
            Print(" · "),
            Print(phase_style.apply(session.phase.label())),
            Print(format!(" {indicator} ")),
            Print(theme::dim().apply(tail)),
        )
        .ok();
        self.out.flush().ok();
    }

    /// Print the session list: title headings, the current entry marked,
    /// completed entries check-marked.
    pub fn render_list(&mut self, session: &Session) {
        if session.items.is_empty() {
            return;
        }
        queue!(self.out, Print("\r\n")).ok();
        let width = self.width();
        for item in &session.items {
            match item.kind {
                ItemKind::Title => {
                    let text = truncate_to_width(&item.text, width.saturating_sub(1));
                    queue!(
                        self.out,
                        Print(theme::title_item().apply(text)),
                        Print("\r\n")
                    )
                    .ok();
                }
                ItemKind::WorkEntry => {
                    let (marker, style) = if item.completed {
                        ("  ✓ ", theme::completed_task())
                    } else {
                        ("  ▸ ", theme::current_task())
                    };
                    let text = truncate_to_width(&item.text, width.saturating_sub(5));
                    queue!(
                        self.out,
                        Print(marker),
                        Print(style.apply(text)),
                        Print("\r\n")
                    )
                    .ok();
                }
            }
        }
        self.out.flush().ok();
    }

    pub fn render_phase_end(&mut self, end: &PhaseEnd) {
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::phase_end().apply(end.message())),
            Print("\r\n")
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_error(&mut self, message: &str) {
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::error().apply(message)),
            Print("\r\n")
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_title_staged(&mut self, title: &str) {
        let note = format!("title \"{title}\" staged for the next work block");
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::dim().apply(note)),
            Print("\r\n")
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_reset_confirm(&mut self) {
        let prompt = "Reset the whole pomodoro cycle? This clears the list and saved state. (y/N) ";
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::error().apply(prompt))
        )
        .ok();
        self.out.flush().ok();
    }

    pub fn render_reset_done(&mut self) {
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::dim().apply("cycle reset")),
            Print("\r\n")
        )
        .ok();
        self.out.flush().ok();
    }

    /// Open the input line, echoing the activating character if any.
    pub fn render_input_start(&mut self, field: InputField, first: Option<char>) {
        let prompt = format!("{}> ", field.label());
        queue!(
            self.out,
            Print("\r\n"),
            Print(theme::prompt_style().apply(prompt))
        )
        .ok();
        if let Some(c) = first {
            queue!(self.out, Print(c)).ok();
        }
        self.out.flush().ok();
    }

    /// Redraw the input line after the target field switched.
    pub fn render_input_line(&mut self, field: InputField, buffer: &str) {
        let prompt = format!("{}> ", field.label());
        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::CurrentLine),
            Print(theme::prompt_style().apply(prompt)),
            Print(buffer)
        )
        .ok();
        self.out.flush().ok();
    }

    fn status_tail(&self, session: &Session) -> String {
        let text = if session.phase == Phase::Work {
            if session.current_task_description.is_empty() {
                format!("describe pomodoro #{} to start", session.next_ordinal())
            } else {
                session.current_task_description.clone()
            }
        } else {
            "press space to start the break".to_string()
        };
        truncate_to_width(&text, self.width().saturating_sub(14))
    }

    fn width(&self) -> usize {
        self.width.unwrap_or_else(super::term_width)
    }
}

/// Truncate to a display width, appending `…` when text was cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
