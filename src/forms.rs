use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::ActionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub documents: bool,
    pub workspaces: bool,
}

impl Refresh {
    pub const DOCUMENTS: Refresh = Refresh {
        documents: true,
        workspaces: false,
    };
    pub const WORKSPACES: Refresh = Refresh {
        documents: false,
        workspaces: true,
    };
    pub const ALL: Refresh = Refresh {
        documents: true,
        workspaces: true,
    };
}

/// `on_success` is always followed by `on_close`; a failed submission calls neither.
pub trait ModalHost {
    fn on_success(&mut self, refresh: Refresh);
    fn on_close(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    None,
    Submit,
    Close,
    Copy(String),
}

#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    pub phase: FormPhase,
    pub error: Option<ActionError>,
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn begin<T>(&mut self, validated: Result<T, ActionError>) -> Option<T> {
        match validated {
            Ok(value) => {
                self.error = None;
                self.phase = FormPhase::Submitting;
                Some(value)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    pub fn fail(&mut self, err: ActionError) {
        self.error = Some(err);
        self.phase = FormPhase::Idle;
    }

    pub fn succeed(&mut self) {
        self.error = None;
        self.phase = FormPhase::Idle;
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(ActionError::message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.push(ch);
                true
            }
            _ => false,
        }
    }

    pub fn push_str(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|ch| !ch.is_control()));
    }

    pub fn display(&self, focused: bool) -> String {
        let mut shown = if self.masked && !focused {
            mask(&self.value)
        } else if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        if focused {
            shown.push('▏');
        }
        shown
    }
}

pub fn mask(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let len = value.chars().count();
    if len <= 4 {
        return "••••".to_string();
    }
    let tail: String = value.chars().skip(len - 4).collect();
    format!("••••{tail}")
}

pub fn cycle_focus(current: usize, len: usize, backwards: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if backwards {
        (current + len - 1) % len
    } else {
        (current + 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_field_edits() {
        let mut field = TextField::new();
        field.handle_key(key(KeyCode::Char('h')));
        field.handle_key(key(KeyCode::Char('i')));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "h");
        assert!(!field.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn masked_field_never_shows_plain_text() {
        let mut field = TextField::masked();
        field.set("hunter22");
        assert_eq!(field.display(false), "••••er22");
        assert_eq!(field.display(true), "••••••••▏");
    }

    #[test]
    fn mask_short_values() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "••••");
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(cycle_focus(2, 3, false), 0);
        assert_eq!(cycle_focus(0, 3, true), 2);
        assert_eq!(cycle_focus(0, 0, false), 0);
    }

    #[test]
    fn invalid_form_stays_idle() {
        let mut status = FormStatus::default();
        let started = status.begin::<()>(Err(ActionError::validation("Title is required")));
        assert!(started.is_none());
        assert_eq!(status.phase, FormPhase::Idle);
        assert_eq!(status.error_message(), Some("Title is required"));

        assert_eq!(status.begin(Ok(5)), Some(5));
        assert!(status.is_submitting());
        assert_eq!(status.error, None);
    }
}
