//! Form state: the session plus UI-only concerns (focus, picker row,
//! output scrolling).

use crate::language::Language;
use crate::session::{update, Effect, Field, SessionEvent, SessionState};

/// Which control currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Language,
    Code,
    Input,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Language => Focus::Code,
            Focus::Code => Focus::Input,
            Focus::Input => Focus::Language,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub focus: Focus,
    /// Highlighted row while the language picker is open.
    pub picker_row: usize,
    /// Manual scroll offset for the output pane (0 = top).
    pub output_scroll: u16,
}

impl App {
    pub fn new(language: Language) -> Self {
        Self {
            session: SessionState::new(language),
            focus: Focus::Code,
            picker_row: Language::ALL.iter().position(|&l| l == language).unwrap_or(0),
            output_scroll: 0,
        }
    }

    /// Feed an event through the session reducer.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Effect> {
        update(&mut self.session, event)
    }

    /// The text-entry buffer under focus, if any.
    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::Code => Some(Field::Code),
            Focus::Input => Some(Field::Input),
            Focus::Language => None,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn open_picker(&mut self) {
        self.picker_row = Language::ALL
            .iter()
            .position(|&l| l == self.session.language)
            .unwrap_or(0);
        self.apply(SessionEvent::PickerToggled);
    }

    pub fn picker_up(&mut self) {
        if self.picker_row > 0 {
            self.picker_row -= 1;
        }
    }

    pub fn picker_down(&mut self) {
        if self.picker_row + 1 < Language::ALL.len() {
            self.picker_row += 1;
        }
    }

    pub fn picker_choice(&self) -> Language {
        Language::ALL[self.picker_row]
    }

    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_output_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(1);
    }

    pub fn status_line(&self) -> String {
        if self.session.loading {
            "Executing... | Ctrl+C quit".to_string()
        } else {
            "Ctrl+R run | Shift+Tab switch field | Tab indent | Ctrl+C quit".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_controls() {
        let mut app = App::new(Language::Python);
        let start = app.focus;
        app.cycle_focus();
        app.cycle_focus();
        app.cycle_focus();
        assert_eq!(app.focus, start);
    }

    #[test]
    fn opening_picker_highlights_current_language() {
        let mut app = App::new(Language::Java);
        app.open_picker();
        assert!(app.session.picker_open);
        assert_eq!(app.picker_choice(), Language::Java);
    }

    #[test]
    fn picker_row_stays_in_bounds() {
        let mut app = App::new(Language::Python);
        app.picker_up();
        assert_eq!(app.picker_row, 0);
        for _ in 0..10 {
            app.picker_down();
        }
        assert_eq!(app.picker_row, Language::ALL.len() - 1);
    }
}
