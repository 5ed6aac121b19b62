use std::future::Future;

use super::error::ServiceError;

/// A text-generation backend that answers one prompt at a time.
///
/// Transport, authentication and retry policy are up to the implementation.
pub trait CompletionService {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ServiceError>> + Send;
}
