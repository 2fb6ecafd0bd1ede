use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use tryon_genai::{GeminiClient, GeminiConfig, GenerationClient, GenerationVariant};
use tryon_notify::{NotificationDispatcher, WebhookConfig, WebhookNotifier};
use tryon_pipeline::TryOnPipeline;
use tryon_store::TryOnStore;

use crate::config::{ENV_API_KEY, GenerationServerConfig, NotificationConfig, TryOnConfig};
use crate::error::ServerError;

/// Resolve the configured generation variant, applying any model override.
pub fn create_variant(config: &GenerationServerConfig) -> Result<GenerationVariant, ServerError> {
    let variant = GenerationVariant::by_name(&config.variant)
        .map_err(|e| ServerError::Config(e.to_string()))?;
    Ok(match &config.model {
        Some(model) => variant.with_model(model),
        None => variant,
    })
}

/// Build the Gemini client. A missing API key is a startup error.
pub fn create_client(
    config: &GenerationServerConfig,
) -> Result<Arc<dyn GenerationClient>, ServerError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ServerError::Config(format!("{ENV_API_KEY} is not set")))?;

    let mut gemini = GeminiConfig::new(api_key).with_timeout(config.timeout_seconds);
    if let Some(endpoint) = &config.endpoint {
        gemini = gemini.with_endpoint(endpoint);
    }
    let client = GeminiClient::new(gemini).map_err(|e| ServerError::Config(e.to_string()))?;
    Ok(Arc::new(client))
}

/// Build the notification dispatcher, or `None` when no sink is configured.
pub fn create_dispatcher(
    config: &NotificationConfig,
) -> Result<Option<NotificationDispatcher>, ServerError> {
    let Some(url) = config.webhook_url.as_deref().filter(|_| config.enabled()) else {
        info!("no notification sink configured, notifications disabled");
        return Ok(None);
    };

    let webhook = config.headers.iter().fold(
        WebhookConfig::new(url).with_timeout_secs(config.timeout_seconds),
        |webhook, (name, value)| webhook.with_header(name, value),
    );
    let notifier =
        WebhookNotifier::new(webhook).map_err(|e| ServerError::Config(e.to_string()))?;
    info!(url = %notifier.url(), "webhook notifications enabled");

    Ok(Some(NotificationDispatcher::new(
        Arc::new(notifier),
        Duration::from_secs(config.timeout_seconds),
    )))
}

/// Assemble the pipeline from configuration and an already created store.
pub fn create_pipeline(
    config: &TryOnConfig,
    store: Arc<dyn TryOnStore>,
) -> Result<TryOnPipeline, ServerError> {
    let variant = create_variant(&config.generation)?;
    info!(variant = %variant, "generation variant selected");

    let mut builder = TryOnPipeline::builder()
        .store(store)
        .client(create_client(&config.generation)?)
        .variant(variant);
    if let Some(dispatcher) = create_dispatcher(&config.notification)? {
        builder = builder.dispatcher(dispatcher);
    }
    builder.build().map_err(|e| ServerError::Config(e.to_string()))
}
