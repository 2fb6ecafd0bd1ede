use serde::Deserialize;

/// Generation model configuration.
///
/// # Example
///
/// ```toml
/// [generation]
/// variant = "flash-image"
/// timeout_seconds = 120
/// ```
#[derive(Deserialize)]
pub struct GenerationServerConfig {
    /// Name of the built-in generation variant.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Replaces the variant's model identifier when set.
    pub model: Option<String>,
    /// Replaces the default API endpoint when set.
    pub endpoint: Option<String>,
    /// API key. Usually supplied through `GEMINI_API_KEY` instead.
    pub api_key: Option<String>,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GenerationServerConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            model: None,
            endpoint: None,
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl std::fmt::Debug for GenerationServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationServerConfig")
            .field("variant", &self.variant)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_variant() -> String {
    tryon_genai::GenerationVariant::DEFAULT_NAME.to_owned()
}

fn default_timeout() -> u64 {
    120
}
