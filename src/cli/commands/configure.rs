//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{API_KEY_ENV, ConfigFile, ConfigManager, GtrConfig};
use crate::translation::{DEFAULT_MODEL, SUPPORTED_LANGUAGES};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the saved settings. Otherwise lets the user
/// interactively set the default model, target language and timeout.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_if_exists()?;
        print_current_settings(&config, &manager);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_if_exists()?;

    print_current_settings(&config, manager);

    let model = prompt_model(config.gtr.model.as_deref())?;
    let target = select_target_language(config.gtr.target.as_deref())?;
    let timeout_secs = prompt_timeout(config.gtr.timeout_secs)?;

    config.gtr = GtrConfig {
        model: Some(model),
        target: Some(target),
        timeout_secs,
        ..config.gtr
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_settings(config: &ConfigFile, manager: &ConfigManager) {
    let not_set = || Style::secondary("(not set)");
    let settings = &config.gtr;

    println!("{}", Style::header("Current settings"));
    println!(
        "  {}        {}",
        Style::label("model"),
        settings.model.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("target"),
        settings.target.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("endpoint"),
        settings.endpoint.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {} {}",
        Style::label("timeout_secs"),
        settings
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map_or_else(|| Style::secondary("(no limit)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("api_key_env"),
        Style::value(settings.api_key_env.as_deref().unwrap_or(API_KEY_ENV))
    );
    println!(
        "  {}         {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display().to_string())
    );
    println!();
}

fn prompt_model(default: Option<&str>) -> Result<String> {
    let model = Text::new("Default model:")
        .with_help_message("Gemini model name, e.g. gemini-2.5-flash")
        .with_default(default.unwrap_or(DEFAULT_MODEL))
        .prompt()?;

    let model = model.trim();
    if model.is_empty() {
        bail!("Model name cannot be empty");
    }

    Ok(model.to_string())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    // Build options with format "code - Name"
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_index = default
        .and_then(|d| {
            SUPPORTED_LANGUAGES
                .iter()
                .position(|(code, name)| *code == d || *name == d)
        })
        .or_else(|| SUPPORTED_LANGUAGES.iter().position(|(code, _)| *code == "ja"))
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(code_from_selection(&selection).to_string())
}

/// Extracts the code from a "code - Name" selection.
fn code_from_selection(selection: &str) -> &str {
    selection.split(" - ").next().unwrap_or(selection)
}

fn prompt_timeout(default: Option<u64>) -> Result<Option<u64>> {
    let answer = Text::new("Request timeout in seconds:")
        .with_help_message("0 or empty waits indefinitely")
        .with_default(&default.unwrap_or(0).to_string())
        .prompt()?;

    parse_timeout(&answer)
}

fn parse_timeout(answer: &str) -> Result<Option<u64>> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }

    match answer.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(secs) => Ok(Some(secs)),
        Err(_) => bail!("Invalid timeout: '{answer}' is not a whole number of seconds"),
    }
}
