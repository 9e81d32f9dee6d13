//! HuggingFace inference router client.
//!
//! The router fronts many open-weight models (gpt-oss, Kimi, GLM) behind a
//! single OpenAI-compatible endpoint.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::openai_compatible::{error_from_status, extract_completion_text, ChatCompletionRequest};
use super::CompletionProvider;
use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::Vendor;

/// Client for the HuggingFace inference router.
#[derive(Debug)]
pub struct HuggingFace {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl HuggingFace {
    pub const DEFAULT_BASE_URL: &'static str = "https://router.huggingface.co/v1";

    /// Creates a client against the production router.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (used by tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key.into()),
            base_url: base_url.into(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for HuggingFace {
    fn vendor(&self) -> Vendor {
        Vendor::HuggingFace
    }

    async fn complete(
        &self,
        model_id: &str,
        request: &PromptRequest,
    ) -> Result<String, HarnessError> {
        let body = ChatCompletionRequest::bare(model_id, request);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("HuggingFace request payload: {json}");
            }
        }

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        log::debug!("HuggingFace HTTP status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let raw = response.text().await?;
        extract_completion_text(&raw)
    }
}
