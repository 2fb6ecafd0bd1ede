mod cors;
mod generation;
mod notification;
mod server;
mod store;

#[cfg(test)]
mod tests;

pub use cors::*;
pub use generation::*;
pub use notification::*;
pub use server::*;
pub use store::*;

use std::path::Path;

use serde::Deserialize;

use crate::error::ServerError;

/// Environment variable holding the Gemini API key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable holding the notification webhook URL.
pub const ENV_WEBHOOK_URL: &str = "TRYON_WEBHOOK_URL";
/// Environment variable holding the store connection URL.
pub const ENV_STORE_URL: &str = "TRYON_STORE_URL";
/// Environment variable holding a comma-separated list of allowed origins.
pub const ENV_CORS_ORIGINS: &str = "CORS_ORIGINS";

/// Top-level configuration for the try-on server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct TryOnConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store backend configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Generation model configuration.
    #[serde(default)]
    pub generation: GenerationServerConfig,
    /// Completed try-on notification configuration.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Cross-origin request policy.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl TryOnConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Self::parse("");
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`. Secrets and deployment endpoints set this
    /// way take precedence over the file. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.generation.api_key = Some(key);
        }
        if let Some(url) = get(ENV_WEBHOOK_URL) {
            self.notification.webhook_url = Some(url);
        }
        if let Some(url) = get(ENV_STORE_URL) {
            self.store.url = Some(url);
        }
        if let Some(origins) = get(ENV_CORS_ORIGINS) {
            self.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_owned)
                .collect();
        }
    }
}
