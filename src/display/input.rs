use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::{cursor, queue, terminal};

use crate::event::InputField;

/// Result of processing a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// No action yet — still editing, or nothing relevant pressed.
    None,
    /// Input began — caller should draw the prompt (and the first char).
    Activated {
        field: InputField,
        first: Option<char>,
    },
    /// User submitted the buffer for the given field.
    Submit(String, InputField),
    /// Tab switched the target field mid-edit; caller redraws the line.
    Switched(InputField),
    /// User cancelled input (Escape).
    Cancel,
    /// Space or Enter pressed while idle.
    TogglePlayPause,
    /// Ctrl+R pressed — caller runs the reset confirmation.
    ResetRequest,
    /// Ctrl+C or Ctrl+D.
    Quit,
}

/// Simple line editor for the task/title inputs in raw mode.
///
/// Idle keys control the timer; the first typed character activates the
/// task input (Tab activates the title input instead). Editing echoes
/// directly to stdout.
#[derive(Default)]
pub struct InputHandler {
    buffer: String,
    active: bool,
    field: InputField,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Activate the editor for a field, e.g. to refocus the task input
    /// after a rejected start.
    pub fn activate(&mut self, field: InputField) {
        self.buffer.clear();
        self.field = field;
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.buffer.clear();
    }

    /// Process a terminal key event. Returns the action to take.
    pub fn handle_key(&mut self, event: &KeyEvent) -> InputAction {
        if !self.active {
            return self.handle_idle_key(event);
        }

        match event.code {
            KeyCode::Char('c' | 'd') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                let mut out = io::stdout();
                queue!(out, crossterm::style::Print(c)).ok();
                out.flush().ok();
                InputAction::None
            }
            KeyCode::Backspace => {
                if !self.buffer.is_empty() {
                    self.buffer.pop();
                    let mut out = io::stdout();
                    // Move back, clear to end of line
                    queue!(
                        out,
                        cursor::MoveLeft(1),
                        terminal::Clear(terminal::ClearType::UntilNewLine),
                    )
                    .ok();
                    out.flush().ok();
                }
                InputAction::None
            }
            KeyCode::Tab => {
                self.field = match self.field {
                    InputField::Task => InputField::Title,
                    InputField::Title => InputField::Task,
                };
                InputAction::Switched(self.field)
            }
            KeyCode::Enter => {
                let text = self.buffer.clone();
                let field = self.field;
                self.deactivate();
                self.clear_input_line();
                if text.trim().is_empty() {
                    return InputAction::Cancel;
                }
                InputAction::Submit(text, field)
            }
            KeyCode::Esc => {
                self.deactivate();
                self.clear_input_line();
                InputAction::Cancel
            }
            _ => InputAction::None,
        }
    }

    fn handle_idle_key(&mut self, event: &KeyEvent) -> InputAction {
        match event.code {
            KeyCode::Char('c' | 'd') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char('r') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::ResetRequest
            }
            KeyCode::Char(' ') | KeyCode::Enter => InputAction::TogglePlayPause,
            KeyCode::Tab => {
                self.activate(InputField::Title);
                InputAction::Activated {
                    field: InputField::Title,
                    first: None,
                }
            }
            KeyCode::Char(c) => {
                self.activate(InputField::Task);
                self.buffer.push(c);
                InputAction::Activated {
                    field: InputField::Task,
                    first: Some(c),
                }
            }
            _ => InputAction::None,
        }
    }

    /// Clear the input line so the status line can redraw in its place.
    fn clear_input_line(&self) {
        let mut out = io::stdout();
        queue!(
            out,
            crossterm::style::Print("\r"),
            terminal::Clear(terminal::ClearType::CurrentLine),
        )
        .ok();
        out.flush().ok();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn first_char_activates_task_input() {
        let mut input = InputHandler::new();
        let action = input.handle_key(&key(KeyCode::Char('w')));
        assert_eq!(
            action,
            InputAction::Activated {
                field: InputField::Task,
                first: Some('w'),
            }
        );
        assert!(input.is_active());
        assert_eq!(input.buffer(), "w");
    }

    #[test]
    fn typed_text_submits_on_enter() {
        let mut input = InputHandler::new();
        input.handle_key(&key(KeyCode::Char('h')));
        input.handle_key(&key(KeyCode::Char('i')));
        let action = input.handle_key(&key(KeyCode::Enter));
        assert_eq!(action, InputAction::Submit("hi".into(), InputField::Task));
        assert!(!input.is_active());
    }

    #[test]
    fn tab_while_idle_opens_the_title_input() {
        let mut input = InputHandler::new();
        let action = input.handle_key(&key(KeyCode::Tab));
        assert_eq!(
            action,
            InputAction::Activated {
                field: InputField::Title,
                first: None,
            }
        );

        input.handle_key(&key(KeyCode::Char('a')));
        let action = input.handle_key(&key(KeyCode::Enter));
        assert_eq!(action, InputAction::Submit("a".into(), InputField::Title));
    }

    #[test]
    fn tab_while_editing_switches_the_field() {
        let mut input = InputHandler::new();
        input.handle_key(&key(KeyCode::Char('x')));
        let action = input.handle_key(&key(KeyCode::Tab));
        assert_eq!(action, InputAction::Switched(InputField::Title));
        assert_eq!(input.buffer(), "x");
    }

    #[test]
    fn escape_cancels_without_submitting() {
        let mut input = InputHandler::new();
        input.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(input.handle_key(&key(KeyCode::Esc)), InputAction::Cancel);
        assert!(!input.is_active());
        assert!(input.buffer().is_empty());
    }

    #[test]
    fn whitespace_only_submission_is_a_cancel() {
        let mut input = InputHandler::new();
        input.handle_key(&key(KeyCode::Char(' ')));
        // Space while idle toggles instead of typing.
        assert!(!input.is_active());

        input.activate(InputField::Task);
        input.handle_key(&key(KeyCode::Char(' ')));
        assert_eq!(input.handle_key(&key(KeyCode::Enter)), InputAction::Cancel);
    }

    #[test]
    fn idle_controls() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(&key(KeyCode::Char(' '))),
            InputAction::TogglePlayPause
        );
        assert_eq!(
            input.handle_key(&key(KeyCode::Enter)),
            InputAction::TogglePlayPause
        );
        assert_eq!(input.handle_key(&ctrl('r')), InputAction::ResetRequest);
        assert_eq!(input.handle_key(&ctrl('c')), InputAction::Quit);
        assert_eq!(input.handle_key(&ctrl('d')), InputAction::Quit);
    }

    #[test]
    fn backspace_edits_the_buffer() {
        let mut input = InputHandler::new();
        input.handle_key(&key(KeyCode::Char('a')));
        input.handle_key(&key(KeyCode::Char('b')));
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.buffer(), "a");
        input.handle_key(&key(KeyCode::Backspace));
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.buffer(), "");
    }
}
