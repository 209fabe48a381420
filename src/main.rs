mod cli;
mod client;
mod config;
mod handlers;
mod language;
mod printer;
mod session;
mod tui;

use std::io::{self, Read};

use anyhow::Result;
use is_terminal::IsTerminal;

use config::Config;
use handlers::{defaults::DefaultsHandler, run::RunHandler};
use language::Language;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Cli::parse();

    // CLI overrides land in the environment before the config loads.
    if let Some(url) = args.base_url.as_deref() {
        std::env::set_var("BACKEND_URL", url);
    }
    if let Some(secs) = args.timeout {
        std::env::set_var("REQUEST_TIMEOUT", secs.to_string());
    }

    let cfg = Config::load();
    let language = match args.language {
        Some(l) => l,
        None => cfg
            .get("DEFAULT_LANGUAGE")
            .unwrap_or_else(|| "python".into())
            .parse()?,
    };

    if args.list_languages {
        for l in Language::ALL {
            println!("{:<12} {}", l.id(), l.label());
        }
        return Ok(());
    }
    if args.defaults {
        return DefaultsHandler::run(language).await;
    }

    // A piped stdin counts as a code source; a bare invocation on a
    // terminal opens the interactive form.
    let stdin_is_tty = io::stdin().is_terminal();
    let code = resolve_code(&args, stdin_is_tty)?;

    match code {
        Some(code) if !args.tui => {
            let input = resolve_input(&args)?;
            RunHandler::run(language, code, input, args.json).await
        }
        _ => tui::run_tui(language).await,
    }
}

fn resolve_code(args: &cli::Cli, stdin_is_tty: bool) -> Result<Option<String>> {
    if let Some(code) = &args.code {
        return Ok(Some(code.clone()));
    }
    match args.file.as_deref() {
        Some("-") => Ok(Some(read_stdin()?)),
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None if !stdin_is_tty => {
            let buf = read_stdin()?;
            if buf.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(buf))
            }
        }
        None => Ok(None),
    }
}

fn resolve_input(args: &cli::Cli) -> Result<String> {
    if let Some(text) = &args.input {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input_file {
        return Ok(std::fs::read_to_string(path)?);
    }
    Ok(String::new())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
