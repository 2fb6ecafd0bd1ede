//! Redis record store backend for the try-on service.
//!
//! Records are stored under a configurable key prefix. Uploads are hashes so
//! that resolving a token reads only the image field; everything else is a
//! JSON string:
//!
//! | Key | Type | Contents |
//! |-----|------|----------|
//! | `{prefix}:upload:{id}` | hash | `payload` (base64), `created_at`, optional `role` |
//! | `{prefix}:tryon:{id}` | string | [`TryOnRecord`](tryon_core::TryOnRecord) without feedback |
//! | `{prefix}:tryon:{id}:feedback` | string | [`FeedbackRecord`](tryon_core::FeedbackRecord) |
//! | `{prefix}:feedback:index` | set | try-on ids that carry feedback |
//! | `{prefix}:feedback:serial` | string | serial counter, advanced with `INCR` |
//! | `{prefix}:status` | list | [`StatusCheck`](tryon_core::StatusCheck) in insertion order |
//!
//! # Example
//!
//! ```ignore
//! use tryon_store_redis::{RedisStoreConfig, RedisTryOnStore};
//!
//! let config = RedisStoreConfig::new("redis://localhost:6379");
//! let store = RedisTryOnStore::new(&config)?;
//! ```

mod config;
mod keys;
mod scripts;
mod store;

pub use config::RedisStoreConfig;
pub use store::RedisTryOnStore;
