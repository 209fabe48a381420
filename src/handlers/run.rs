//! One-shot run: submit code once and print the result.

use std::io::{self, Write};

use anyhow::Result;

use crate::client::{ExecutionRequest, PlaygroundClient};
use crate::config::Config;
use crate::language::Language;
use crate::printer::TextPrinter;

pub struct RunHandler;

impl RunHandler {
    pub async fn run(language: Language, code: String, input: String, json: bool) -> Result<()> {
        let cfg = Config::load();
        let client = PlaygroundClient::from_config(&cfg)?;
        let req = ExecutionRequest { language, code, input };

        if json {
            let resp = client.execute_raw(&req).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            return Ok(());
        }

        let outcome = client.execute(&req).await;
        if outcome.is_error() {
            // Degrade in place, like the form: report and stay usable.
            TextPrinter { color: Some("red") }.eprint(outcome.text());
        } else {
            // Program output verbatim; no trailing newline of our own.
            print!("{}", outcome.text());
            io::stdout().flush()?;
        }
        Ok(())
    }
}
