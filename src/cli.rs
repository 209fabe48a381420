use clap::{ArgGroup, Parser};

use crate::language::Language;

#[derive(Parser, Debug, Clone)]
#[command(name = "playpad", about = "Terminal playground for remote code execution", version)]
#[command(group(ArgGroup::new("source").args(["file", "code"]).multiple(false)))]
#[command(group(ArgGroup::new("stdin_text").args(["input", "input_file"]).multiple(false)))]
pub struct Cli {
    /// Source file to run. Use "-" to read code from stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Language to run the code as (defaults to DEFAULT_LANGUAGE).
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Inline code to run instead of a file.
    #[arg(short = 'e', long = "eval", value_name = "CODE")]
    pub code: Option<String>,

    /// Text fed to the program's stdin.
    #[arg(short, long)]
    pub input: Option<String>,

    /// File whose contents feed the program's stdin.
    #[arg(long = "input-file", value_name = "FILE")]
    pub input_file: Option<String>,

    /// Print the starter snippet for the language and exit.
    #[arg(long)]
    pub defaults: bool,

    /// List supported languages.
    #[arg(long = "list-languages", visible_alias = "ll")]
    pub list_languages: bool,

    /// Print the raw JSON response body instead of formatted output.
    #[arg(long)]
    pub json: bool,

    /// Open the interactive form even when code is supplied.
    #[arg(long)]
    pub tui: bool,

    /// Override BACKEND_URL for this invocation.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
