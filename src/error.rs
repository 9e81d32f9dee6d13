use thiserror::Error;

/// Error types that can occur when dispatching prompts to vendor APIs.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required credential or endpoint for a vendor family is absent
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),
    /// A model key was requested that the registry does not know
    #[error("Model '{requested}' not found. Valid keys: {}", .available.join(", "))]
    ModelNotFound {
        requested: String,
        available: Vec<String>,
    },
    /// Network or HTTP-level failure calling a vendor
    #[error("Transport error: {0}")]
    TransportError(String),
    /// Error reported by the vendor itself (quota, content filter, bad request)
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// Vendor payload did not contain the expected fields
    #[error("Response parse error: {message}. Raw response: {raw_response}")]
    ResponseParseError {
        message: String,
        raw_response: String,
    },
    /// Caller-supplied input was rejected before any vendor call
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for HarnessError {
    fn from(err: reqwest::Error) -> Self {
        HarnessError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::ResponseParseError {
            message: format!("{} at line {} column {}", err, err.line(), err.column()),
            raw_response: String::new(),
        }
    }
}
