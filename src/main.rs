use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use gtr_cli::cli::commands::{configure, translate};
use gtr_cli::cli::{Args, Command};
use gtr_cli::output::{self, OutputConfig};
use gtr_cli::translation::{TranslateError, print_languages};
use gtr_cli::ui::Style;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = output::report_error(&mut io::stderr().lock(), &Style::error(error_message(&err)));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            let options = translate::TranslateOptions {
                url: args.url,
                target: args.target,
                model: args.model,
                endpoint: args.endpoint,
                timeout: args.timeout,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

const MAX_ERROR_LINE_CHARS: usize = 500;

fn error_message(err: &anyhow::Error) -> String {
    if let Some(err) = err.downcast_ref::<TranslateError>() {
        let message = output::single_line(&err.to_string(), MAX_ERROR_LINE_CHARS);
        return format!("Translation error: {message}");
    }

    let message = format!("{err:#}");
    if message.starts_with("Error:") {
        message
    } else {
        format!("Error: {message}")
    }
}
