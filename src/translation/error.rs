use std::time::Duration;
use thiserror::Error;

/// Failure reported by a completion service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to connect to {url}: {message}")]
    Connection { url: String, message: String },

    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode API response: {0}")]
    Decode(String),

    #[error("API returned no translation{}", reason_suffix(.reason.as_deref()))]
    Empty { reason: Option<String> },
}

/// `reason` is a prompt block reason or a candidate finish reason.
fn reason_suffix(reason: Option<&str>) -> String {
    reason.map(|r| format!(" (reason: {r})")).unwrap_or_default()
}

/// Failure of one translation invocation.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),
}
