use std::sync::Arc;

use tryon_genai::{GenerationClient, GenerationVariant};
use tryon_notify::NotificationDispatcher;
use tryon_store::TryOnStore;

use crate::error::BuildError;
use crate::metrics::PipelineMetrics;
use crate::pipeline::TryOnPipeline;

/// Fluent builder for a [`TryOnPipeline`].
///
/// A store and a generation client are required. The variant defaults to
/// [`GenerationVariant::default`] and notification is off unless a
/// dispatcher is supplied.
pub struct PipelineBuilder {
    store: Option<Arc<dyn TryOnStore>>,
    client: Option<Arc<dyn GenerationClient>>,
    variant: GenerationVariant,
    dispatcher: Option<NotificationDispatcher>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            client: None,
            variant: GenerationVariant::default(),
            dispatcher: None,
        }
    }

    /// Set the record store.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn TryOnStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the generation client.
    #[must_use]
    pub fn client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.client = Some(client);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: GenerationVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable best-effort notification of completed try-ons.
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Consume the builder and produce a configured [`TryOnPipeline`].
    pub fn build(self) -> Result<TryOnPipeline, BuildError> {
        let store = self.store.ok_or(BuildError("record store"))?;
        let client = self.client.ok_or(BuildError("generation client"))?;

        Ok(TryOnPipeline {
            store,
            client,
            variant: self.variant,
            dispatcher: self.dispatcher,
            metrics: Arc::new(PipelineMetrics::default()),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
