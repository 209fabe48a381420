//! Reqwest-based client for the playground backend: starter snippets via
//! `GET /default`, execution via `POST /execute`.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::language::Language;

/// Body of `POST /execute`. Empty strings are legal; the backend decides
/// what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub language: Language,
    pub code: String,
    pub input: String,
}

/// Body of the `/execute` response. A non-empty `error` means the run
/// failed regardless of HTTP status.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
}

/// Starter snippets keyed by language, as returned by `GET /default`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultCode {
    #[serde(default)]
    pub python: String,
    #[serde(default)]
    pub javascript: String,
    #[serde(default)]
    pub java: String,
}

impl DefaultCode {
    pub fn for_language(&self, language: Language) -> &str {
        match language {
            Language::Python => &self.python,
            Language::Javascript => &self.javascript,
            Language::Java => &self.java,
        }
    }
}

/// A finished run as the UI consumes it: captured stdout, or an error
/// message to display in the output area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Output(String),
    Failed(String),
}

impl RunOutcome {
    pub fn text(&self) -> &str {
        match self {
            RunOutcome::Output(s) | RunOutcome::Failed(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunOutcome::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct PlaygroundClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlaygroundClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let base_url = cfg
            .get("BACKEND_URL")
            .filter(|s| !s.trim().is_empty())
            .with_context(|| {
                format!(
                    "BACKEND_URL is not set. Export it or add it to {}",
                    cfg.config_path.display()
                )
            })?;

        let timeout_secs = cfg.get_u64("REQUEST_TIMEOUT").unwrap_or(60);
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            bail!("backend base URL must not be empty");
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch the full starter-snippet map. The caller picks the field for
    /// its current language.
    pub async fn fetch_defaults(&self) -> Result<DefaultCode> {
        let url = format!("{}/default", self.base_url);
        debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP error: status {}", status.as_u16());
        }
        Ok(resp.json::<DefaultCode>().await?)
    }

    /// Run code and fold every failure mode into a displayable outcome:
    /// backend-reported errors verbatim, transport and status failures
    /// prefixed with `Error:`. Never retries.
    pub async fn execute(&self, req: &ExecutionRequest) -> RunOutcome {
        match self.execute_raw(req).await {
            Ok(resp) if !resp.error.is_empty() => RunOutcome::Failed(resp.error),
            Ok(resp) => RunOutcome::Output(resp.output),
            Err(err) => RunOutcome::Failed(format!("Error: {}", err)),
        }
    }

    /// Run code and return the decoded response body. Non-2xx status is an
    /// error regardless of what the body says.
    pub async fn execute_raw(&self, req: &ExecutionRequest) -> Result<ExecutionResponse> {
        let url = format!("{}/execute", self.base_url);
        debug!("POST {} ({})", url, req.language);
        let resp = self.http.post(&url).json(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP error: status {}", status.as_u16());
        }
        Ok(resp.json::<ExecutionResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_code_field_selection() {
        let defaults = DefaultCode {
            python: "print('hi')".into(),
            javascript: "console.log('hi');".into(),
            java: "class Main {}".into(),
        };
        assert_eq!(defaults.for_language(Language::Python), "print('hi')");
        assert_eq!(defaults.for_language(Language::Java), "class Main {}");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(PlaygroundClient::new("  ", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn base_url_is_normalized() {
        let client =
            PlaygroundClient::new("http://localhost:8080/playground/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/playground");
    }
}
