//! Session state and its reducer.
//!
//! All interesting transitions go through [`update`], which mutates the
//! state and may ask the caller to perform one asynchronous effect. The
//! event loop owns the state; completions come back in as further events.

pub mod buffer;

use crate::client::{DefaultCode, ExecutionRequest, RunOutcome};
use crate::language::Language;
use buffer::TextBuffer;

/// Which editable buffer an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Input,
}

/// Everything the UI observes for one page view. In-memory only; dropped
/// with the process.
#[derive(Debug)]
pub struct SessionState {
    pub language: Language,
    pub code: TextBuffer,
    pub input: TextBuffer,
    pub output: String,
    pub has_error: bool,
    pub loading: bool,
    pub picker_open: bool,
}

impl SessionState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            code: TextBuffer::new(),
            input: TextBuffer::new(),
            output: String::new(),
            has_error: false,
            loading: false,
            picker_open: false,
        }
    }

    fn buffer_mut(&mut self, field: Field) -> &mut TextBuffer {
        match field {
            Field::Code => &mut self.code,
            Field::Input => &mut self.input,
        }
    }
}

/// A single cursor/text operation on one of the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Newline,
    Indent,
    Backspace,
    Delete,
    Left { select: bool },
    Right { select: bool },
    Up { select: bool },
    Down { select: bool },
    Home { select: bool },
    End { select: bool },
}

#[derive(Debug)]
pub enum SessionEvent {
    /// Initial mount: kicks off the first defaults fetch.
    Started,
    PickerToggled,
    /// Picker choice confirmed: select, close the picker, refetch defaults.
    LanguagePicked(Language),
    /// A defaults fetch finished. `language` is the selection at the time
    /// the fetch was issued; whichever response arrives last overwrites
    /// the buffer, stale or not.
    DefaultsLoaded {
        language: Language,
        result: Result<DefaultCode, String>,
    },
    /// Explicit run request. Ignored while a request is outstanding.
    RunRequested,
    RunFinished(RunOutcome),
    Edit(Field, EditOp),
}

/// Asynchronous work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadDefaults(Language),
    Execute(ExecutionRequest),
}

pub fn update(state: &mut SessionState, event: SessionEvent) -> Option<Effect> {
    match event {
        SessionEvent::Started => {
            state.loading = true;
            Some(Effect::LoadDefaults(state.language))
        }
        SessionEvent::PickerToggled => {
            state.picker_open = !state.picker_open;
            None
        }
        SessionEvent::LanguagePicked(language) => {
            state.language = language;
            state.picker_open = false;
            state.loading = true;
            Some(Effect::LoadDefaults(language))
        }
        SessionEvent::DefaultsLoaded { language, result } => {
            // Overlapping fetches are never cancelled; the last completion
            // wins the buffer even if its language is no longer selected.
            state.loading = false;
            match result {
                Ok(defaults) => state.code.set_text(defaults.for_language(language)),
                Err(msg) => state
                    .code
                    .set_text(format!("// Failed to fetch default code: {}", msg)),
            }
            None
        }
        SessionEvent::RunRequested => {
            if state.loading {
                return None;
            }
            state.output.clear();
            state.has_error = false;
            state.loading = true;
            Some(Effect::Execute(ExecutionRequest {
                language: state.language,
                code: state.code.text().to_string(),
                input: state.input.text().to_string(),
            }))
        }
        SessionEvent::RunFinished(outcome) => {
            state.loading = false;
            state.has_error = outcome.is_error();
            state.output = match outcome {
                RunOutcome::Output(s) | RunOutcome::Failed(s) => s,
            };
            None
        }
        SessionEvent::Edit(field, op) => {
            let buf = state.buffer_mut(field);
            match op {
                EditOp::Insert(c) => buf.insert_char(c),
                EditOp::Newline => buf.insert_newline(),
                EditOp::Indent => buf.insert_indent(),
                EditOp::Backspace => buf.backspace(),
                EditOp::Delete => buf.delete(),
                EditOp::Left { select } => buf.move_left(select),
                EditOp::Right { select } => buf.move_right(select),
                EditOp::Up { select } => buf.move_up(select),
                EditOp::Down { select } => buf.move_down(select),
                EditOp::Home { select } => buf.move_home(select),
                EditOp::End { select } => buf.move_end(select),
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DefaultCode {
        DefaultCode {
            python: "print('Hello, World!')".into(),
            javascript: "console.log('Hello, World!');".into(),
            java: "public class Main {}".into(),
        }
    }

    #[test]
    fn start_fetches_defaults_for_initial_language() {
        let mut s = SessionState::new(Language::Python);
        let effect = update(&mut s, SessionEvent::Started);
        assert_eq!(effect, Some(Effect::LoadDefaults(Language::Python)));
        assert!(s.loading);
    }

    #[test]
    fn picking_a_language_closes_picker_and_fetches_once() {
        let mut s = SessionState::new(Language::Python);
        s.picker_open = true;
        let effect = update(&mut s, SessionEvent::LanguagePicked(Language::Java));
        assert_eq!(effect, Some(Effect::LoadDefaults(Language::Java)));
        assert_eq!(s.language, Language::Java);
        assert!(!s.picker_open);
    }

    #[test]
    fn successful_fetch_fills_code_buffer() {
        let mut s = SessionState::new(Language::Javascript);
        update(&mut s, SessionEvent::Started);
        let effect = update(
            &mut s,
            SessionEvent::DefaultsLoaded {
                language: Language::Javascript,
                result: Ok(defaults()),
            },
        );
        assert_eq!(effect, None);
        assert_eq!(s.code.text(), "console.log('Hello, World!');");
        assert!(!s.loading);
    }

    #[test]
    fn failed_fetch_leaves_placeholder_in_buffer() {
        let mut s = SessionState::new(Language::Python);
        update(&mut s, SessionEvent::Started);
        update(
            &mut s,
            SessionEvent::DefaultsLoaded {
                language: Language::Python,
                result: Err("HTTP error: status 500".into()),
            },
        );
        assert!(s.code.text().contains("Failed"));
        assert!(s.code.text().contains("HTTP error: status 500"));
    }

    #[test]
    fn overlapping_fetches_last_response_wins() {
        let mut s = SessionState::new(Language::Python);
        update(&mut s, SessionEvent::LanguagePicked(Language::Javascript));
        update(&mut s, SessionEvent::LanguagePicked(Language::Java));
        // Responses arrive out of order: java first, then the stale js one.
        update(
            &mut s,
            SessionEvent::DefaultsLoaded { language: Language::Java, result: Ok(defaults()) },
        );
        update(
            &mut s,
            SessionEvent::DefaultsLoaded {
                language: Language::Javascript,
                result: Ok(defaults()),
            },
        );
        assert_eq!(s.code.text(), "console.log('Hello, World!');");
        assert_eq!(s.language, Language::Java);
    }

    #[test]
    fn run_clears_previous_result_and_disables_reentry() {
        let mut s = SessionState::new(Language::Python);
        s.code.set_text("print(1)");
        s.output = "stale".into();
        s.has_error = true;

        let effect = update(&mut s, SessionEvent::RunRequested);
        match effect {
            Some(Effect::Execute(req)) => {
                assert_eq!(req.language, Language::Python);
                assert_eq!(req.code, "print(1)");
                assert_eq!(req.input, "");
            }
            other => panic!("expected execute effect, got {:?}", other),
        }
        assert_eq!(s.output, "");
        assert!(!s.has_error);
        assert!(s.loading);

        // Second request while loading is a no-op.
        assert!(update(&mut s, SessionEvent::RunRequested).is_none());
    }

    #[test]
    fn run_completion_sets_output_and_flag_together() {
        let mut s = SessionState::new(Language::Python);
        update(&mut s, SessionEvent::RunRequested);
        update(&mut s, SessionEvent::RunFinished(RunOutcome::Output("1\n".into())));
        assert_eq!(s.output, "1\n");
        assert!(!s.has_error);
        assert!(!s.loading);

        update(&mut s, SessionEvent::RunRequested);
        update(&mut s, SessionEvent::RunFinished(RunOutcome::Failed("SyntaxError".into())));
        assert_eq!(s.output, "SyntaxError");
        assert!(s.has_error);
        assert!(!s.loading);
    }

    #[test]
    fn tab_edit_reaches_the_right_buffer() {
        let mut s = SessionState::new(Language::Python);
        s.input.set_text("ab");
        update(&mut s, SessionEvent::Edit(Field::Input, EditOp::Right { select: false }));
        update(&mut s, SessionEvent::Edit(Field::Input, EditOp::Indent));
        assert_eq!(s.input.text(), "a    b");
        assert_eq!(s.code.text(), "");
    }
}
