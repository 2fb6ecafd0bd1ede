use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::{AsyncCommands, Script};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use tryon_core::{
    EncodedImage, FeedbackEntry, FeedbackRecord, StatusCheck, TryOnRecord, UploadRecord,
};
use tryon_store::{StoreError, TryOnStore};

use crate::config::RedisStoreConfig;
use crate::keys::KeySpace;
use crate::scripts;

/// Redis-backed implementation of [`TryOnStore`].
///
/// Uses a `deadpool-redis` connection pool. Records are JSON strings;
/// feedback lives beside its try-on under a separate key so that attaching
/// it never rewrites the image payloads.
pub struct RedisTryOnStore {
    pool: Pool,
    keys: KeySpace,
}

impl RedisTryOnStore {
    /// Create a new `RedisTryOnStore` from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the pool cannot be created.
    pub fn new(config: &RedisStoreConfig) -> Result<Self, StoreError> {
        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map(|b| {
                b.max_size(config.pool_size)
                    .wait_timeout(Some(config.connection_timeout))
                    .runtime(Runtime::Tokio1)
                    .build()
            })
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            keys: KeySpace::new(&config.prefix),
        })
    }

    /// Obtain a connection from the pool.
    async fn conn(&self) -> Result<deadpool_redis::Connection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Hash field holding an upload's image; lookups read only this field.
const UPLOAD_PAYLOAD_FIELD: &str = "payload";

/// Field/value pairs written for an upload hash.
fn upload_fields(record: &UploadRecord) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        (UPLOAD_PAYLOAD_FIELD, record.payload.as_str().to_owned()),
        ("created_at", record.created_at.to_rfc3339()),
    ];
    if let Some(role) = record.role {
        fields.push(("role", role.as_str().to_owned()));
    }
    fields
}

fn backend(e: redis::RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl TryOnStore for RedisTryOnStore {
    async fn put_upload(&self, record: &UploadRecord) -> Result<(), StoreError> {
        let fields = upload_fields(record);
        let mut conn = self.conn().await?;
        let () = conn
            .hset_multiple(self.keys.upload(&record.upload_id), &fields)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn upload_payload(&self, upload_id: &str) -> Result<Option<EncodedImage>, StoreError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn
            .hget(self.keys.upload(upload_id), UPLOAD_PAYLOAD_FIELD)
            .await
            .map_err(backend)?;
        Ok(raw.map(EncodedImage::from_encoded))
    }

    async fn insert_tryon(&self, record: &TryOnRecord) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let mut pipe = redis::pipe();
        pipe.atomic();

        if let Some(feedback) = &record.feedback {
            let base = TryOnRecord {
                feedback: None,
                ..record.clone()
            };
            pipe.set(self.keys.tryon(&record.id), to_json(&base)?)
                .set(self.keys.feedback(&record.id), to_json(feedback)?)
                .sadd(self.keys.feedback_index(), &record.id);
        } else {
            pipe.set(self.keys.tryon(&record.id), to_json(record)?)
                .del(self.keys.feedback(&record.id))
                .srem(self.keys.feedback_index(), &record.id);
        }

        let () = pipe.query_async(&mut conn).await.map_err(backend)?;
        debug!(id = %record.id, "stored try-on record");
        Ok(())
    }

    async fn get_tryon(&self, id: &str) -> Result<Option<TryOnRecord>, StoreError> {
        let mut conn = self.conn().await?;
        let (raw, feedback): (Option<String>, Option<String>) = redis::pipe()
            .get(self.keys.tryon(id))
            .get(self.keys.feedback(id))
            .query_async(&mut conn)
            .await
            .map_err(backend)?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut record: TryOnRecord = from_json(&raw)?;
        record.feedback = feedback.as_deref().map(from_json).transpose()?;
        Ok(Some(record))
    }

    async fn attach_feedback(
        &self,
        try_on_id: &str,
        feedback: &FeedbackRecord,
    ) -> Result<bool, StoreError> {
        let value = to_json(feedback)?;
        let mut conn = self.conn().await?;
        let script = Script::new(scripts::ATTACH_FEEDBACK);
        let result: i64 = script
            .key(self.keys.tryon(try_on_id))
            .key(self.keys.feedback(try_on_id))
            .key(self.keys.feedback_index())
            .arg(value)
            .arg(try_on_id)
            .invoke_async(&mut conn)
            .await
            .map_err(backend)?;

        Ok(result == 1)
    }

    async fn next_feedback_serial(&self) -> Result<u64, StoreError> {
        let mut conn = self.conn().await?;
        conn.incr(self.keys.feedback_serial(), 1u64)
            .await
            .map_err(backend)
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, StoreError> {
        let mut conn = self.conn().await?;
        let ids: Vec<String> = conn
            .smembers(self.keys.feedback_index())
            .await
            .map_err(backend)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| self.keys.feedback(id)).collect();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(backend)?;

        let mut entries = Vec::with_capacity(ids.len());
        for (try_on_id, raw) in ids.into_iter().zip(values) {
            // Index entries can briefly outlive their value; skip them.
            let Some(raw) = raw else { continue };
            entries.push(FeedbackEntry {
                try_on_id,
                feedback: from_json(&raw)?,
            });
        }
        Ok(entries)
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        let value = to_json(check)?;
        let mut conn = self.conn().await?;
        let _: i64 = conn
            .rpush(self.keys.status(), value)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
        let mut conn = self.conn().await?;
        let raw: Vec<String> = conn
            .lrange(self.keys.status(), 0, stop)
            .await
            .map_err(backend)?;
        raw.iter().map(|r| from_json(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use tryon_core::ImageRole;

    use super::*;

    #[test]
    fn upload_hash_keeps_payload_in_its_own_field() {
        let record = UploadRecord::new(EncodedImage::from_bytes(b"img"), Some(ImageRole::Person));
        let fields = upload_fields(&record);

        let payload: Vec<_> = fields
            .iter()
            .filter(|(field, _)| *field == UPLOAD_PAYLOAD_FIELD)
            .collect();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].1, record.payload.as_str());
        assert_eq!(EncodedImage::from_encoded(payload[0].1.clone()), record.payload);

        assert!(fields.iter().any(|(field, value)| *field == "role" && value == "person"));
        assert!(fields.iter().any(|(field, _)| *field == "created_at"));
    }

    #[test]
    fn anonymous_upload_has_no_role_field() {
        let record = UploadRecord::new(EncodedImage::from_bytes(b"img"), None);
        let fields = upload_fields(&record);
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|(field, _)| *field != "role"));
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    fn test_config() -> RedisStoreConfig {
        RedisStoreConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            prefix: format!("tryon-test-{}", uuid::Uuid::new_v4()),
            ..RedisStoreConfig::default()
        }
    }

    #[tokio::test]
    async fn store_conformance() {
        let config = test_config();
        let store = RedisTryOnStore::new(&config).expect("pool creation should succeed");
        tryon_store::testing::run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }
}
