//! Resolution of vendor credentials and endpoints.
//!
//! Each value is looked up in the process environment first, then in
//! `~/.runway/secrets.json` (a flat JSON object of name to value). Values
//! are held as [`SecretString`] so they never show up in debug output.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::error::HarnessError;

/// Environment variable holding the HuggingFace router token.
pub const HUGGINGFACE_TOKEN: &str = "HUGGINGFACE_TOKEN";
/// Environment variable holding the Azure OpenAI API key (shared with the
/// Foundry endpoint).
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable holding the Azure OpenAI resource endpoint.
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the full Azure Foundry chat URI.
pub const AZURE_FOUNDRY_URI: &str = "AZURE_FOUNDRY_URI";
/// Environment variable holding the Cohere API key.
pub const COHERE_API_KEY: &str = "COHERE_API_KEY";

/// Credential lookup with an environment override and a file fallback.
#[derive(Debug)]
pub struct CredentialStore {
    secrets: HashMap<String, SecretString>,
}

impl CredentialStore {
    /// Loads the file-backed secrets from the default location. A missing
    /// file is fine; a malformed one is an error.
    pub fn load() -> io::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self {
                secrets: HashMap::new(),
            }),
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".runway").join("secrets.json"))
    }

    fn load_from(path: PathBuf) -> io::Result<Self> {
        let mut secrets = HashMap::new();
        match File::open(&path) {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                let parsed: HashMap<String, String> = serde_json::from_str(&contents)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
                secrets = parsed
                    .into_iter()
                    .map(|(name, value)| (name, SecretString::new(value)))
                    .collect();
            }
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        Ok(Self { secrets })
    }

    /// Looks up a value by name: environment first, stored secrets second.
    pub fn get(&self, name: &str) -> Option<SecretString> {
        if let Ok(value) = std::env::var(name) {
            if !value.is_empty() {
                return Some(SecretString::new(value));
            }
        }
        self.secrets
            .get(name)
            .map(|secret| SecretString::new(secret.expose_secret().clone()))
    }

    /// Like [`get`](Self::get) but absence is a configuration error naming
    /// the missing variable.
    pub fn require(&self, name: &str) -> Result<SecretString, HarnessError> {
        self.get(name).ok_or_else(|| {
            HarnessError::ConfigurationMissing(format!(
                "{name} is not set (environment or ~/.runway/secrets.json)"
            ))
        })
    }
}
