mod error;
mod gemini;
mod invoker;
mod language;
mod prompt;
mod service;

pub use error::{ServiceError, TranslateError};
pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiClient};
pub use invoker::Invoker;
pub use language::{SUPPORTED_LANGUAGES, language_name, print_languages, resolve_target};
pub use prompt::TranslationRequest;
pub use service::CompletionService;
