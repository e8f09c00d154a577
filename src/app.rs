//! The main event loop: routes clock ticks and key presses into the
//! controller, and turns the results into rendering, persistence, and
//! notification side effects.
//!
//! Ordering discipline around the clock: the generation stamped on each
//! tick is checked before any state moves, and the clock is cancelled
//! before (or atomically with) every transition that stops the countdown,
//! so a stale tick can never fire into moved-on state.

use std::io::Write;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use crossterm::terminal;
use tokio::sync::mpsc;

use crate::clock::Clock;
use crate::display::input::{InputAction, InputHandler};
use crate::display::renderer::Renderer;
use crate::event::{AppEvent, InputField};
use crate::notify::Notifier;
use crate::session::controller::{Controller, TickOutcome};
use crate::session::state::Phase;
use crate::store::Store;

/// RAII guard for terminal raw mode.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

/// Flow control signal from key handling.
#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<W: Write> {
    controller: Controller,
    clock: Clock,
    store: Store,
    notifier: Notifier,
    renderer: Renderer<W>,
    input: InputHandler,
    /// Set while the y/N reset confirmation is on screen.
    confirm_reset: bool,
}

impl<W: Write> App<W> {
    pub fn new(
        controller: Controller,
        clock: Clock,
        store: Store,
        notifier: Notifier,
        renderer: Renderer<W>,
    ) -> Self {
        Self {
            controller,
            clock,
            store,
            notifier,
            renderer,
            input: InputHandler::new(),
            confirm_reset: false,
        }
    }

    /// Drive the app until the user quits or the event channel closes.
    pub async fn run(&mut self, rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Result<()> {
        self.renderer.render_help();
        self.renderer.render_list(self.controller.session());
        self.renderer.render_status(self.controller.session());

        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::Tick { generation } => self.on_tick(generation),
                AppEvent::Terminal(Event::Key(key)) => {
                    if self.on_key(&key) == Flow::Quit {
                        break;
                    }
                }
                AppEvent::Terminal(Event::Resize(..)) => {
                    self.renderer.render_status(self.controller.session());
                }
                AppEvent::Terminal(_) => {}
            }
        }
        Ok(())
    }

    fn on_tick(&mut self, generation: u64) {
        // A tick emitted before a cancel can still be queued; drop it.
        if !self.clock.is_current(generation) {
            return;
        }
        match self.controller.tick() {
            TickOutcome::Ignored => {}
            TickOutcome::Running => {
                if !self.input.is_active() && !self.confirm_reset {
                    self.renderer.render_status(self.controller.session());
                }
            }
            TickOutcome::PhaseEnded(end) => {
                self.clock.cancel();
                self.notifier.phase_ended(&end);
                self.persist();
                self.renderer.render_phase_end(&end);
                self.renderer.render_list(self.controller.session());
                self.renderer.render_status(self.controller.session());
            }
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> Flow {
        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y' | 'Y')) {
                self.reset();
            } else {
                self.renderer.render_status(self.controller.session());
            }
            return Flow::Continue;
        }

        match self.input.handle_key(key) {
            InputAction::None => {}
            InputAction::Quit => return Flow::Quit,
            InputAction::Activated { field, first } => {
                self.renderer.render_input_start(field, first);
            }
            InputAction::Switched(field) => {
                self.renderer.render_input_line(field, self.input.buffer());
            }
            InputAction::Cancel => {
                self.renderer.render_status(self.controller.session());
            }
            InputAction::Submit(text, InputField::Task) => {
                self.controller.set_task_description(&text);
                self.try_start();
            }
            InputAction::Submit(text, InputField::Title) => {
                self.controller.stage_title(&text);
                self.persist();
                self.renderer
                    .render_title_staged(self.controller.session().pending_overall_title.as_str());
                self.renderer.render_status(self.controller.session());
            }
            InputAction::TogglePlayPause => {
                if self.controller.session().running {
                    // Cancel before the state moves so no tick lands in
                    // between.
                    self.clock.cancel();
                    self.controller.pause();
                    self.renderer.render_status(self.controller.session());
                } else {
                    self.try_start();
                }
            }
            InputAction::ResetRequest => {
                self.confirm_reset = true;
                self.renderer.render_reset_confirm();
            }
        }
        Flow::Continue
    }

    /// Start the countdown, surfacing validation errors and refocusing the
    /// task input when the description is missing.
    fn try_start(&mut self) {
        match self.controller.start() {
            Ok(true) => {
                if self.controller.session().phase == Phase::Work {
                    self.persist();
                    self.renderer.render_list(self.controller.session());
                }
                self.clock.start();
                self.renderer.render_status(self.controller.session());
            }
            Ok(false) => {}
            Err(err) => {
                self.renderer.render_error(&err.to_string());
                self.input.activate(InputField::Task);
                self.renderer.render_input_start(InputField::Task, None);
            }
        }
    }

    fn reset(&mut self) {
        self.clock.cancel();
        self.controller.reset();
        self.store.purge();
        self.input.deactivate();
        self.renderer.render_reset_done();
        self.renderer.render_status(self.controller.session());
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(self.controller.session()) {
            tracing::warn!(error = %err, "failed to persist session state");
        }
    }
}
