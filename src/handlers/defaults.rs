//! Print the starter snippet for a language.

use anyhow::Result;

use crate::client::PlaygroundClient;
use crate::config::Config;
use crate::language::Language;
use crate::printer::TextPrinter;

pub struct DefaultsHandler;

impl DefaultsHandler {
    pub async fn run(language: Language) -> Result<()> {
        let cfg = Config::load();
        let client = PlaygroundClient::from_config(&cfg)?;
        let defaults = client.fetch_defaults().await?;
        TextPrinter { color: None }.print(defaults.for_language(language));
        Ok(())
    }
}
