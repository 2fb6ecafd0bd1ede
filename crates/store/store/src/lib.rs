//! Persistence abstraction for staged uploads, try-on records, feedback and
//! status pings.
//!
//! Backends implement [`TryOnStore`]. The [`testing`] module carries a
//! conformance suite every backend runs against a fresh instance.

pub mod error;
pub mod store;
pub mod testing;

pub use error::StoreError;
pub use store::TryOnStore;
