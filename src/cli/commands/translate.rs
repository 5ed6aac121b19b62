use anyhow::Result;
use std::io::{self, Write};

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::{Input, InputReader};
use crate::output;
use crate::translation::{GeminiClient, Invoker};
use crate::ui::Style;

pub struct TranslateOptions {
    pub url: Option<String>,
    pub target: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_if_exists()?;

    let resolve_options = ResolveOptions {
        target: options.target,
        model: options.model,
        endpoint: options.endpoint,
        timeout_secs: options.timeout,
    };
    let config = resolve_config(&resolve_options, &config_file)?;

    let input = InputReader::read(options.url.as_deref())?;
    let is_url = input.is_url();
    if let Input::Url(url) = &input {
        crate::status!(
            "{}",
            Style::secondary(format!("Translating {url} to {}", config.target_language))
        );
    }
    let request = input.into_request(config.target_language);

    let client = GeminiClient::new(config.endpoint, config.model, config.api_key)
        .with_url_context(is_url);
    let invoker = Invoker::new(client)
        .with_indicator(output::indicator())
        .with_timeout(config.timeout);

    let translated = invoker.invoke(&request.prompt()).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{translated}")?;
    stdout.flush()?;

    Ok(())
}
