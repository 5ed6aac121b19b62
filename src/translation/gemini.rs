use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::error::ServiceError;
use super::service::CompletionService;
use crate::output;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: Cow<'a, str>,
}

#[derive(Debug, Serialize)]
struct Tool {
    url_context: UrlContext,
}

#[derive(Debug, Serialize)]
struct UrlContext {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    url_context: bool,
}

impl GeminiClient {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            url_context: false,
        }
    }

    /// Lets the model fetch URLs mentioned in the prompt.
    #[must_use]
    pub fn with_url_context(mut self, enabled: bool) -> Self {
        self.url_context = enabled;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl CompletionService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = self.url();

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: Cow::Borrowed(prompt),
                }],
            }],
            tools: if self.url_context {
                vec![Tool {
                    url_context: UrlContext {},
                }]
            } else {
                Vec::new()
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Connection {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ServiceError::Connection {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        parse_response(&text)
    }
}

/// Prefers the API's own `error.message` over the raw body, flattened to
/// one line.
fn api_error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_| body.to_string(), |parsed| parsed.error.message);
    output::single_line(&message, MAX_ERROR_MESSAGE_CHARS)
}

fn parse_response(body: &str) -> Result<String, ServiceError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;

    let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ServiceError::Empty {
            reason: block_reason,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(ServiceError::Empty {
            reason: block_reason.or(candidate.finish_reason),
        });
    }

    Ok(text)
}
