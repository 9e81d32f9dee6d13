//! Azure AI Foundry serverless endpoint client.
//!
//! One shared URI serves every Foundry model (Grok, DeepSeek-R1, Llama,
//! Phi, Jais); the model id travels in the request body. Unlike the other
//! chat endpoints this one expects the sampling parameters spelled out.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::openai_compatible::{error_from_status, extract_completion_text, ChatCompletionRequest};
use super::CompletionProvider;
use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::Vendor;

/// Client for an Azure AI Foundry serverless chat endpoint.
#[derive(Debug)]
pub struct AzureFoundry {
    client: Client,
    api_key: SecretString,
    /// Full URI of the chat completions endpoint.
    endpoint: String,
}

impl AzureFoundry {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key.into()),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for AzureFoundry {
    fn vendor(&self) -> Vendor {
        Vendor::AzureFoundry
    }

    async fn complete(
        &self,
        model_id: &str,
        request: &PromptRequest,
    ) -> Result<String, HarnessError> {
        let body = ChatCompletionRequest::with_sampling(model_id, request);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Azure Foundry request payload: {json}");
            }
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        log::debug!("Azure Foundry HTTP status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let raw = response.text().await?;
        extract_completion_text(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_model_and_sampling_in_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/chat/completions")
            .match_header("authorization", "Bearer az-extras")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "grok-3",
                "max_tokens": 4096,
                "temperature": 0.8,
                "top_p": 0.95,
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Jupiter"}}]}"#)
            .create_async()
            .await;

        let provider = AzureFoundry::new(
            "az-extras",
            format!("{}/models/chat/completions", server.url()),
        );
        let text = provider
            .complete("grok-3", &PromptRequest::new("Largest planet?"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Jupiter");
    }

    #[tokio::test]
    async fn vendor_message_without_error_envelope_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/chat/completions")
            .with_status(401)
            .with_body(r#"{"message":"invalid api key"}"#)
            .create_async()
            .await;

        let provider = AzureFoundry::new(
            "wrong",
            format!("{}/models/chat/completions", server.url()),
        );
        let err = provider
            .complete("phi-4", &PromptRequest::new("hi"))
            .await
            .unwrap_err();
        match err {
            HarnessError::ProviderError(message) => assert!(message.contains("invalid api key")),
            other => panic!("expected ProviderError, got {other:?}"),
        }
    }
}
