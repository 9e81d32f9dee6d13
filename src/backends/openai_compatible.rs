//! Wire types and response handling shared by the OpenAI-compatible
//! backends (HuggingFace router, Azure OpenAI, Azure Foundry).

use serde::{Deserialize, Serialize};

use crate::completion::PromptRequest;
use crate::error::HarnessError;

#[derive(Serialize, Debug)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Request body for a `chat/completions`-shaped endpoint.
#[derive(Serialize, Debug)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Model and prompt only; the endpoint applies its own defaults.
    pub(crate) fn bare(model: &'a str, request: &'a PromptRequest) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.text,
            }],
            max_tokens: None,
            temperature: None,
            top_p: None,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    /// Full sampling parameters, for endpoints that expect them spelled out.
    pub(crate) fn with_sampling(model: &'a str, request: &'a PromptRequest) -> Self {
        Self {
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            top_p: Some(request.top_p),
            presence_penalty: Some(request.presence_penalty),
            frequency_penalty: Some(request.frequency_penalty),
            ..Self::bare(model, request)
        }
    }
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Error envelope most OpenAI-compatible endpoints return on failure.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ErrorBody {
    Structured { message: String },
    Plain(String),
}

/// Extracts `choices[0].message.content` from a raw response body.
pub(crate) fn extract_completion_text(raw: &str) -> Result<String, HarnessError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(raw).map_err(|err| HarnessError::ResponseParseError {
            message: err.to_string(),
            raw_response: truncate_raw(raw),
        })?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content);
    match content {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(HarnessError::ResponseParseError {
            message: "missing choices[0].message.content".to_string(),
            raw_response: truncate_raw(raw),
        }),
    }
}

/// Maps a non-success HTTP response to a harness error.
///
/// A vendor-reported message (quota, content filter, bad request) becomes a
/// `ProviderError`; anything else is a `TransportError` carrying the status.
pub(crate) async fn error_from_status(response: reqwest::Response) -> HarnessError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match vendor_error_message(&body) {
        Some(message) => HarnessError::ProviderError(format!("HTTP {status}: {message}")),
        None => HarnessError::TransportError(format!("HTTP {status}: {}", truncate_raw(&body))),
    }
}

fn vendor_error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    match envelope.error {
        Some(ErrorBody::Structured { message }) => Some(message),
        Some(ErrorBody::Plain(message)) => Some(message),
        None => envelope.message,
    }
}

// Error payloads can be arbitrarily large; keep what a human needs to read.
fn truncate_raw(raw: &str) -> String {
    const MAX: usize = 512;
    if raw.len() <= MAX {
        raw.to_string()
    } else {
        let cut = raw
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &raw[..cut])
    }
}
