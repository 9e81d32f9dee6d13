//! Cohere platform client: v2 chat for completions and v2 rerank for
//! relevance scoring.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::openai_compatible::error_from_status;
use super::CompletionProvider;
use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::Vendor;
use crate::rerank::{RankedDocument, RerankProvider};

pub const DEFAULT_RERANK_MODEL: &str = "rerank-v3.5";

/// Client for the Cohere platform.
#[derive(Debug)]
pub struct Cohere {
    client: Client,
    api_key: SecretString,
    base_url: String,
    rerank_model: String,
}

#[derive(Serialize, Debug)]
struct CohereChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct CohereChatRequest<'a> {
    model: &'a str,
    messages: Vec<CohereChatMessage<'a>>,
}

#[derive(Deserialize, Debug)]
struct CohereChatResponse {
    message: CohereAssistantMessage,
}

#[derive(Deserialize, Debug)]
struct CohereAssistantMessage {
    #[serde(default)]
    content: Vec<CohereContentItem>,
}

#[derive(Deserialize, Debug)]
struct CohereContentItem {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Debug)]
struct CohereRerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Deserialize, Debug)]
struct CohereRerankResponse {
    results: Vec<CohereRerankResult>,
}

#[derive(Deserialize, Debug)]
struct CohereRerankResult {
    index: usize,
    relevance_score: f64,
}

impl Cohere {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cohere.com";

    /// Creates a client against the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (used by tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key.into()),
            base_url: base_url.into(),
            rerank_model: DEFAULT_RERANK_MODEL.to_string(),
        }
    }

    /// Overrides the rerank model.
    pub fn rerank_model(mut self, model: impl Into<String>) -> Self {
        self.rerank_model = model.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for Cohere {
    fn vendor(&self) -> Vendor {
        Vendor::Cohere
    }

    async fn complete(
        &self,
        model_id: &str,
        request: &PromptRequest,
    ) -> Result<String, HarnessError> {
        let body = CohereChatRequest {
            model: model_id,
            messages: vec![CohereChatMessage {
                role: "user",
                content: &request.text,
            }],
        };

        let response = self
            .client
            .post(self.url("/v2/chat"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        log::debug!("Cohere HTTP status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let raw = response.text().await?;
        let parsed: CohereChatResponse =
            serde_json::from_str(&raw).map_err(|err| HarnessError::ResponseParseError {
                message: err.to_string(),
                raw_response: raw.clone(),
            })?;

        // v2 chat returns content as a list of typed items; text items are
        // the assistant output.
        let text: String = parsed
            .message
            .content
            .iter()
            .map(|item| item.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(HarnessError::ResponseParseError {
                message: "missing message.content text".to_string(),
                raw_response: raw,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl RerankProvider for Cohere {
    async fn score(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, HarnessError> {
        let body = CohereRerankRequest {
            model: &self.rerank_model,
            query,
            documents,
            top_n,
        };

        let response = self
            .client
            .post(self.url("/v2/rerank"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        log::debug!("Cohere rerank HTTP status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_status(response).await);
        }

        let raw = response.text().await?;
        let parsed: CohereRerankResponse =
            serde_json::from_str(&raw).map_err(|err| HarnessError::ResponseParseError {
                message: err.to_string(),
                raw_response: raw.clone(),
            })?;

        parsed
            .results
            .into_iter()
            .map(|result| {
                let text = documents.get(result.index).cloned().ok_or_else(|| {
                    HarnessError::ResponseParseError {
                        message: format!(
                            "rerank result index {} out of range for {} documents",
                            result.index,
                            documents.len()
                        ),
                        raw_response: raw.clone(),
                    }
                })?;
                Ok(RankedDocument {
                    index: result.index,
                    text,
                    score: result.relevance_score,
                })
            })
            .collect()
    }
}
