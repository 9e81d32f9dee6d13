//! Azure OpenAI client.
//!
//! Azure routes chat completions per deployment:
//! `{endpoint}/openai/deployments/{deployment}/chat/completions` with the
//! API version as a query parameter and the key in the `api-key` header.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::openai_compatible::{error_from_status, extract_completion_text, ChatCompletionRequest};
use super::CompletionProvider;
use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::Vendor;

pub const DEFAULT_API_VERSION: &str = "2025-04-01-preview";

/// Client for Azure OpenAI deployments.
///
/// The registry's `model_id` for an Azure OpenAI model is the deployment
/// name.
#[derive(Debug)]
pub struct AzureOpenAI {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    api_version: String,
}

impl AzureOpenAI {
    /// Creates a client for the given resource endpoint with the default
    /// API version.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_api_version(api_key, endpoint, DEFAULT_API_VERSION)
    }

    pub fn with_api_version(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key.into()),
            endpoint: endpoint.into(),
            api_version: api_version.into(),
        }
    }

    fn deployment_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint.trim_end_matches('/'),
            deployment
        )
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAI {
    fn vendor(&self) -> Vendor {
        Vendor::AzureOpenAI
    }

    async fn complete(
        &self,
        model_id: &str,
        request: &PromptRequest,
    ) -> Result<String, HarnessError> {
        let body = ChatCompletionRequest::bare(model_id, request);

        let response = self
            .client
            .post(self.deployment_url(model_id))
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        log::debug!(
            "Azure OpenAI deployment '{model_id}' HTTP status: {}",
            response.status()
        );

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let raw = response.text().await?;
        extract_completion_text(&raw)
    }
}
