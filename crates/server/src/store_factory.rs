use std::sync::Arc;

use tryon_store::TryOnStore;
use tryon_store_memory::MemoryTryOnStore;
#[cfg(feature = "redis")]
use tryon_store_redis::{RedisStoreConfig, RedisTryOnStore};

use crate::config::StoreConfig;
use crate::error::ServerError;

/// Create a record store from the given configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn TryOnStore>, ServerError> {
    let store: Arc<dyn TryOnStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryTryOnStore::new()),
        #[cfg(feature = "redis")]
        "redis" => {
            let url = config.url.as_deref().ok_or_else(|| {
                ServerError::Config(
                    "redis backend requires [store] url or TRYON_STORE_URL".into(),
                )
            })?;

            let mut redis_config = RedisStoreConfig::new(url);
            if let Some(prefix) = &config.prefix {
                redis_config = redis_config.with_prefix(prefix);
            }
            if let Some(pool_size) = config.pool_size {
                redis_config.pool_size = pool_size;
            }

            let store = RedisTryOnStore::new(&redis_config)
                .map_err(|e| ServerError::Config(format!("redis store: {e}")))?;
            Arc::new(store)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unknown store backend: {other}"
            )));
        }
    };

    tracing::info!(backend = %config.backend, "record store initialized");
    Ok(store)
}
