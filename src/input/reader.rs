use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal, Read};

use crate::translation::TranslationRequest;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// What the user asked to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text piped on stdin, trimmed.
    Text(String),
    /// A web page the model fetches itself.
    Url(String),
}

impl Input {
    pub fn into_request(self, target_language: impl Into<String>) -> TranslationRequest {
        match self {
            Self::Text(text) => TranslationRequest::text(text, target_language),
            Self::Url(url) => TranslationRequest::url(url, target_language),
        }
    }

    pub const fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

pub struct InputReader;

impl InputReader {
    /// Reads the translation input: the URL argument if given, stdin
    /// otherwise.
    pub fn read(url: Option<&str>) -> Result<Input> {
        if let Some(url) = url {
            return Self::parse_url(url).map(Input::Url);
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail!(
                "Error: No input provided\n\
                 Usage: pbpaste | gtr\n   \
                 or: gtr <URL>"
            );
        }

        Self::read_text(stdin.lock()).map(Input::Text)
    }

    /// The URL goes to the model as typed; fetching it is the API's job.
    fn parse_url(raw: &str) -> Result<String> {
        let url = raw.trim();
        if url.is_empty() {
            bail!("Error: URL is empty");
        }

        Ok(url.to_string())
    }

    fn read_text<R: Read>(mut reader: R) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                     Consider splitting the input into smaller parts.",
                    buffer.len() as f64 / 1024.0 / 1024.0
                );
            }
        }

        let text = String::from_utf8(buffer).context("Input is not valid UTF-8")?;
        let text = text.trim();
        if text.is_empty() {
            bail!("Error: Input text is empty");
        }

        Ok(text.to_string())
    }
}
