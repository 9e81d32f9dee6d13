//! Static catalog mapping short model keys to vendor call parameters.
//!
//! The registry is built once at startup and read-only afterwards. Keys are
//! the short names shown to users ("gpt-4o", "kimi-k2"); each resolves to
//! the vendor family that serves it and the identifier that vendor expects.

use crate::error::HarnessError;

/// Vendor families the harness can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// HuggingFace inference router (OpenAI-compatible).
    HuggingFace,
    /// Azure OpenAI deployments.
    AzureOpenAI,
    /// Azure AI Foundry serverless endpoint (Grok, DeepSeek, Llama, ...).
    AzureFoundry,
    /// Cohere platform (chat and rerank).
    Cohere,
}

impl std::str::FromStr for Vendor {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "huggingface" => Ok(Vendor::HuggingFace),
            "azure-openai" => Ok(Vendor::AzureOpenAI),
            "azure-foundry" => Ok(Vendor::AzureFoundry),
            "cohere" => Ok(Vendor::Cohere),
            _ => Err(HarnessError::InvalidInput(format!("Unknown vendor: {s}"))),
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Vendor::HuggingFace => "huggingface",
            Vendor::AzureOpenAI => "azure-openai",
            Vendor::AzureFoundry => "azure-foundry",
            Vendor::Cohere => "cohere",
        };
        write!(f, "{name}")
    }
}

/// Everything needed to invoke one hosted model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Short stable key, unique within the registry.
    pub key: String,
    /// Vendor family that serves this model.
    pub vendor: Vendor,
    /// Identifier the vendor expects (model id or deployment name).
    pub model_id: String,
}

/// Read-only mapping from model key to [`ModelDescriptor`].
///
/// Descriptors keep registration order so dispatch and display are
/// deterministic.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    descriptors: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The production catalog of hosted models.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let entries: &[(&str, Vendor, &str)] = &[
            ("gpt-4o", Vendor::AzureOpenAI, "gpt-4o"),
            ("gpt-4.1", Vendor::AzureOpenAI, "gpt-4.1"),
            ("o4-mini", Vendor::AzureOpenAI, "o4-mini"),
            ("o1", Vendor::AzureOpenAI, "o1"),
            ("oss-120b", Vendor::HuggingFace, "openai/gpt-oss-120b"),
            ("oss-20b", Vendor::HuggingFace, "openai/gpt-oss-20b"),
            ("kimi-k2", Vendor::HuggingFace, "moonshotai/Kimi-K2-Instruct"),
            ("zai-glm-4.5", Vendor::HuggingFace, "zai-org/GLM-4.5"),
            ("jais-30b", Vendor::AzureFoundry, "jais-30b-chat"),
            ("phi-4", Vendor::AzureFoundry, "Phi-4-reasoning"),
            (
                "llama-4",
                Vendor::AzureFoundry,
                "Llama-4-Maverick-17B-128E-Instruct-FP8",
            ),
            ("grok-3", Vendor::AzureFoundry, "grok-3"),
            ("deepseek-r1", Vendor::AzureFoundry, "DeepSeek-R1-0528"),
            ("mai-ds-r1", Vendor::AzureFoundry, "MAI-DS-R1"),
            ("command-r7b", Vendor::Cohere, "command-r7b-12-2024"),
            ("command-r+", Vendor::Cohere, "command-r-plus-08-2024"),
            ("command-a", Vendor::Cohere, "command-a-03-2025"),
        ];
        for (key, vendor, model_id) in entries {
            registry
                .register(ModelDescriptor {
                    key: (*key).to_string(),
                    vendor: *vendor,
                    model_id: (*model_id).to_string(),
                })
                .expect("builtin catalog has no duplicate keys");
        }
        registry
    }

    /// Adds a descriptor. Fails if the key is already registered.
    pub fn register(&mut self, descriptor: ModelDescriptor) -> Result<(), HarnessError> {
        if self.contains(&descriptor.key) {
            return Err(HarnessError::InvalidInput(format!(
                "Model key '{}' is already registered",
                descriptor.key
            )));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Looks up a descriptor by key.
    ///
    /// Unknown keys fail with [`HarnessError::ModelNotFound`] naming the
    /// requested key and every valid key.
    pub fn get(&self, key: &str) -> Result<&ModelDescriptor, HarnessError> {
        self.descriptors
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| HarnessError::ModelNotFound {
                requested: key.to_string(),
                available: self.keys().map(str::to_string).collect(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.descriptors.iter().any(|d| d.key == key)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.key.as_str())
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builtin_catalog_keys_are_unique() {
        let registry = ModelRegistry::builtin();
        let mut keys: Vec<&str> = registry.keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn unknown_key_lists_valid_keys() {
        let registry = ModelRegistry::builtin();
        let err = registry.get("gpt-5000").unwrap_err();
        match err {
            HarnessError::ModelNotFound {
                requested,
                available,
            } => {
                assert_eq!(requested, "gpt-5000");
                assert_eq!(available.len(), registry.len());
                assert!(available.iter().any(|k| k == "gpt-4o"));
            }
            other => panic!("expected ModelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_key_message_enumerates_catalog() {
        let registry = ModelRegistry::builtin();
        let msg = registry.get("nope").unwrap_err().to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("kimi-k2"));
        assert!(msg.contains("command-a"));
    }

    #[rstest]
    #[case("gpt-4o", Vendor::AzureOpenAI, "gpt-4o")]
    #[case("kimi-k2", Vendor::HuggingFace, "moonshotai/Kimi-K2-Instruct")]
    #[case("grok-3", Vendor::AzureFoundry, "grok-3")]
    #[case("command-r+", Vendor::Cohere, "command-r-plus-08-2024")]
    fn builtin_catalog_resolves(
        #[case] key: &str,
        #[case] vendor: Vendor,
        #[case] model_id: &str,
    ) {
        let registry = ModelRegistry::builtin();
        let descriptor = registry.get(key).unwrap();
        assert_eq!(descriptor.vendor, vendor);
        assert_eq!(descriptor.model_id, model_id);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ModelRegistry::new();
        let descriptor = ModelDescriptor {
            key: "dup".into(),
            vendor: Vendor::Cohere,
            model_id: "command-a-03-2025".into(),
        };
        registry.register(descriptor.clone()).unwrap();
        assert!(matches!(
            registry.register(descriptor),
            Err(HarnessError::InvalidInput(_))
        ));
    }

    #[test]
    fn registration_order_is_preserved() {
        let registry = ModelRegistry::builtin();
        let keys: Vec<&str> = registry.keys().take(4).collect();
        assert_eq!(keys, vec!["gpt-4o", "gpt-4.1", "o4-mini", "o1"]);
    }
}
