pub const TEXT_PROMPT_TEMPLATE: &str = "Translate the following text to {target_language}.\n\
     Output only the translation without any explanations or additional text.\n\
     IMPORTANT: Translate the ENTIRE text completely. Do not abbreviate, \
     summarize, or omit any part of the content.\n\n\
     Text:\n{content}";

pub const URL_PROMPT_TEMPLATE: &str = "Access the following URL and translate its content to {target_language}.\n\
     Extract the main content (article text, blog post, etc.) and translate it.\n\
     Ignore navigation menus, advertisements, and other non-content elements.\n\
     Output only the translation without any explanations or additional text.\n\n\
     URL: {content}";

/// One translation job: what to translate, into which language, and whether
/// `content` is a URL the model should fetch itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub content: String,
    pub target_language: String,
    pub is_url: bool,
}

impl TranslationRequest {
    pub fn text(content: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            target_language: target_language.into(),
            is_url: false,
        }
    }

    pub fn url(url: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            content: url.into(),
            target_language: target_language.into(),
            is_url: true,
        }
    }

    /// Builds the prompt sent to the completion service.
    pub fn prompt(&self) -> String {
        let template = if self.is_url {
            URL_PROMPT_TEMPLATE
        } else {
            TEXT_PROMPT_TEMPLATE
        };
        build_prompt(template, &self.target_language, &self.content)
    }
}

/// Fills `{target_language}` and `{content}` in a single left-to-right pass,
/// so placeholder text inside either value is copied verbatim.
#[allow(clippy::literal_string_with_formatting_args)]
fn build_prompt(template: &str, target_language: &str, content: &str) -> String {
    let mut prompt = String::with_capacity(template.len() + target_language.len() + content.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{target_language}") {
            prompt.push_str(target_language);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{content}") {
            prompt.push_str(content);
            rest = after;
        } else {
            prompt.push('{');
            rest = &tail[1..];
        }
    }
    prompt.push_str(rest);

    prompt
}
