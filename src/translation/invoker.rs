use std::time::Duration;

use super::error::TranslateError;
use super::service::CompletionService;
use crate::ui::Indicator;

/// Runs one completion call with the spinner drawn for its whole duration.
///
/// The indicator is stopped and erased before `invoke` returns, on success,
/// failure and timeout alike, so the caller can print right away.
pub struct Invoker<S> {
    service: S,
    indicator: Indicator,
    timeout: Option<Duration>,
}

impl<S: CompletionService> Invoker<S> {
    /// Creates an invoker with no spinner and no deadline.
    pub const fn new(service: S) -> Self {
        Self {
            service,
            indicator: Indicator::disabled(),
            timeout: None,
        }
    }

    /// Uses `indicator`'s sink and interval for every call.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator;
        self
    }

    /// Bounds each call; `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Sends `prompt` and returns the response with surrounding whitespace
    /// removed.
    pub async fn invoke(&self, prompt: &str) -> Result<String, TranslateError> {
        let mut indicator = self.indicator.fresh();
        indicator.start();

        let call = self.service.generate(prompt);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result.map_err(TranslateError::from),
                Err(_) => Err(TranslateError::Timeout(limit)),
            },
            None => call.await.map_err(TranslateError::from),
        };

        indicator.stop();

        outcome.map(|text| text.trim().to_string())
    }
}
