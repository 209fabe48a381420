//! One-shot command handlers (no interactive form).

pub mod defaults;
pub mod run;
