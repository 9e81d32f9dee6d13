//! Prompt text and per-call sampling parameters shared by every backend.

/// A single prompt submission together with its sampling parameters.
///
/// Defaults mirror what the hosted endpoints accept without complaint:
/// 4096 tokens, temperature 0.8, top_p 0.95, no penalties. Built once per
/// user submission and handed by reference to each backend; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// The prompt text sent as the single user message.
    pub text: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
    /// Frequency penalty.
    pub frequency_penalty: f32,
}

impl PromptRequest {
    /// Creates a request with the default sampling parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_tokens: 4096,
            temperature: 0.8,
            top_p: 0.95,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn presence_penalty(mut self, presence_penalty: f32) -> Self {
        self.presence_penalty = presence_penalty;
        self
    }

    pub fn frequency_penalty(mut self, frequency_penalty: f32) -> Self {
        self.frequency_penalty = frequency_penalty;
        self
    }

    /// Whether the prompt text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_endpoint_expectations() {
        let req = PromptRequest::new("hello");
        assert_eq!(req.max_tokens, 4096);
        assert_eq!(req.temperature, 0.8);
        assert_eq!(req.top_p, 0.95);
        assert_eq!(req.presence_penalty, 0.0);
        assert_eq!(req.frequency_penalty, 0.0);
    }

    #[test]
    fn blank_detection_covers_whitespace() {
        assert!(PromptRequest::new("").is_blank());
        assert!(PromptRequest::new("  \n\t ").is_blank());
        assert!(!PromptRequest::new("2+2=?").is_blank());
    }

    #[test]
    fn setters_chain() {
        let req = PromptRequest::new("hi").max_tokens(64).temperature(0.2);
        assert_eq!(req.max_tokens, 64);
        assert_eq!(req.temperature, 0.2);
    }
}
