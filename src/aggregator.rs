//! Dispatches one prompt to a selection of models and collects every
//! outcome into a [`ResultSet`].
//!
//! Dispatch is serial and ordered: each vendor call completes before the
//! next begins, in the order the keys were given. One model failing never
//! aborts the rest of the run.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use secrecy::{ExposeSecret, SecretString};

use crate::backends::{AzureFoundry, AzureOpenAI, Cohere, CompletionProvider, HuggingFace};
use crate::completion::PromptRequest;
use crate::error::HarnessError;
use crate::registry::{ModelRegistry, Vendor};

/// Outcome of one model invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The model produced text.
    Success(String),
    /// The call failed; the message is displayable, never a raw vendor
    /// exception.
    Failure(String),
}

/// One model's result for one submitted prompt. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResult {
    /// Registry key of the model that produced this result.
    pub model_key: String,
    pub outcome: Outcome,
    /// Wall-clock time of the vendor call.
    pub elapsed: Option<Duration>,
}

impl ModelResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    /// The response text, if this call succeeded.
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(text) => Some(text),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure message, if this call failed.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(message) => Some(message),
        }
    }
}

/// Per-prompt collection of model results, in dispatch order.
///
/// A result set is built once per submission and replaced wholesale on the
/// next one; consumers only read it.
#[derive(Debug, Clone)]
pub struct ResultSet {
    prompt: String,
    created_at: DateTime<Local>,
    results: Vec<ModelResult>,
}

impl ResultSet {
    /// The prompt this set answers.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// When the run was started.
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Looks up one model's result by key.
    pub fn get(&self, model_key: &str) -> Option<&ModelResult> {
        self.results.iter().find(|r| r.model_key == model_key)
    }

    /// Results in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Builder for [`Harness`], one method per vendor family.
#[derive(Default)]
pub struct HarnessBuilder {
    registry: Option<ModelRegistry>,
    providers: HashMap<Vendor, Box<dyn CompletionProvider>>,
    include_timing: bool,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            include_timing: true,
            ..Self::default()
        }
    }

    /// Replaces the default builtin registry.
    pub fn registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Whether per-call timing is recorded (on by default).
    pub fn include_timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    pub fn huggingface(self, api_key: &SecretString) -> Self {
        self.provider(Box::new(HuggingFace::new(api_key.expose_secret().clone())))
    }

    pub fn azure_openai(self, api_key: &SecretString, endpoint: impl Into<String>) -> Self {
        self.provider(Box::new(AzureOpenAI::new(
            api_key.expose_secret().clone(),
            endpoint,
        )))
    }

    pub fn azure_foundry(self, api_key: &SecretString, endpoint: impl Into<String>) -> Self {
        self.provider(Box::new(AzureFoundry::new(
            api_key.expose_secret().clone(),
            endpoint,
        )))
    }

    pub fn cohere(self, api_key: &SecretString) -> Self {
        self.provider(Box::new(Cohere::new(api_key.expose_secret().clone())))
    }

    /// Registers an arbitrary provider for its vendor family, replacing any
    /// previous one. This is also the seam tests use to inject doubles.
    pub fn provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.providers.insert(provider.vendor(), provider);
        self
    }

    pub fn build(self) -> Harness {
        Harness {
            registry: self.registry.unwrap_or_else(ModelRegistry::builtin),
            providers: self.providers,
            include_timing: self.include_timing,
        }
    }
}

/// The dispatch-and-aggregation core: resolves model keys through the
/// registry and fans the prompt out to the configured vendor backends,
/// serially.
pub struct Harness {
    registry: ModelRegistry,
    providers: HashMap<Vendor, Box<dyn CompletionProvider>>,
    include_timing: bool,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Whether a provider is configured for the given vendor family.
    pub fn supports(&self, vendor: Vendor) -> bool {
        self.providers.contains_key(&vendor)
    }

    /// Registry keys whose vendor has a configured provider, in registry
    /// order. This is the default selection for a run.
    pub fn configured_keys(&self) -> Vec<String> {
        self.registry
            .descriptors()
            .filter(|d| self.supports(d.vendor))
            .map(|d| d.key.clone())
            .collect()
    }

    /// Dispatches the prompt to every model in `keys`, in order, and
    /// returns one result per key.
    ///
    /// Setup problems (blank prompt, unknown key, unconfigured vendor)
    /// fail the whole call before any network traffic. Per-model vendor
    /// failures do not: they become [`Outcome::Failure`] entries and the
    /// remaining models still run.
    pub async fn run<S: AsRef<str>>(
        &self,
        request: &PromptRequest,
        keys: &[S],
    ) -> Result<ResultSet, HarnessError> {
        if request.is_blank() {
            return Err(HarnessError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        // Resolve everything up front so configuration errors surface
        // before the first vendor call.
        let mut plan: Vec<(&crate::registry::ModelDescriptor, &dyn CompletionProvider)> =
            Vec::with_capacity(keys.len());
        for key in keys {
            let descriptor = self.registry.get(key.as_ref())?;
            if plan.iter().any(|(d, _)| d.key == descriptor.key) {
                continue;
            }
            let provider = self.providers.get(&descriptor.vendor).ok_or_else(|| {
                HarnessError::ConfigurationMissing(format!(
                    "no credentials configured for vendor '{}' (model '{}')",
                    descriptor.vendor, descriptor.key
                ))
            })?;
            plan.push((descriptor, provider.as_ref()));
        }

        let created_at = Local::now();
        let mut results = Vec::with_capacity(plan.len());
        for (descriptor, provider) in plan {
            log::debug!("dispatching '{}' to {}", descriptor.key, descriptor.vendor);
            let start = Instant::now();
            let outcome = match provider.complete(&descriptor.model_id, request).await {
                Ok(text) => Outcome::Success(text),
                Err(err) => {
                    log::warn!("model '{}' failed: {err}", descriptor.key);
                    Outcome::Failure(err.to_string())
                }
            };
            results.push(ModelResult {
                model_key: descriptor.key.clone(),
                outcome,
                elapsed: self.include_timing.then(|| start.elapsed()),
            });
        }

        Ok(ResultSet {
            prompt: request.text.clone(),
            created_at,
            results,
        })
    }

    /// Dispatches to every model whose vendor is configured.
    pub async fn run_all(&self, request: &PromptRequest) -> Result<ResultSet, HarnessError> {
        let keys = self.configured_keys();
        self.run(request, &keys).await
    }
}
