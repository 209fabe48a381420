//! Event types flowing through the form's channel.

use crossterm::event::KeyEvent;

use crate::client::{DefaultCode, RunOutcome};
use crate::language::Language;

#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input.
    Key(KeyEvent),
    /// A defaults fetch completed. `language` is the selection captured
    /// when the request was issued.
    DefaultsLoaded {
        language: Language,
        result: Result<DefaultCode, String>,
    },
    /// A run completed (success or displayable failure).
    RunFinished(RunOutcome),
}
