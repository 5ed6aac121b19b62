use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gtr")]
#[command(about = "Translate text from stdin or a web page with Gemini")]
#[command(after_help = "Examples:\n  pbpaste | gtr\n  gtr https://example.com/article\n  cat notes.md | gtr --target en")]
#[command(version)]
pub struct Args {
    /// URL to translate (reads text from stdin if not provided)
    pub url: Option<String>,

    /// Target language: ISO 639-1 code or language name [default: Japanese]
    #[arg(short = 't', long = "target")]
    pub target: Option<String>,

    /// Gemini model name [env: GTR_MODEL] [default: gemini-2.5-pro]
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Give up after this many seconds (0 waits indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Suppress the spinner and status messages
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
}
