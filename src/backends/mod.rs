//! Vendor backends: one client per vendor family, normalized behind
//! [`CompletionProvider`].

pub mod azure_foundry;
pub mod azure_openai;
pub mod cohere;
pub mod huggingface;
pub mod openai_compatible;

pub use azure_foundry::AzureFoundry;
pub use azure_openai::AzureOpenAI;
pub use cohere::Cohere;
pub use huggingface::HuggingFace;

use async_trait::async_trait;

use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::Vendor;

/// A prompter: sends one prompt to one vendor model and normalizes the
/// outcome.
///
/// Implementations make exactly one outbound call per invocation and map
/// every vendor-side problem (transport, HTTP status, malformed payload)
/// to a [`HarnessError`]; nothing panics and no vendor exception type leaks
/// through this boundary.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// The vendor family this provider talks to.
    fn vendor(&self) -> Vendor;

    /// Sends `request` to the model identified by `model_id` and returns
    /// the generated text.
    async fn complete(
        &self,
        model_id: &str,
        request: &PromptRequest,
    ) -> Result<String, HarnessError>;
}
