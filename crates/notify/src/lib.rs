//! Fan-out of completed try-ons to an external notification sink.
//!
//! Delivery is best effort: one attempt, bounded by a timeout, on a detached
//! task. Failures are logged and discarded and never reach the caller that
//! triggered the notification.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tryon_notify::{NotificationDispatcher, WebhookConfig, WebhookNotifier};
//!
//! let config = WebhookConfig::new("https://hooks.example.com/tryon")
//!     .with_header("X-Source", "tryon");
//! let notifier = WebhookNotifier::new(config)?;
//! let dispatcher = NotificationDispatcher::new(Arc::new(notifier), Duration::from_secs(10));
//! # Ok::<(), tryon_notify::NotifyError>(())
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod mock;
pub mod notifier;
pub mod payload;
pub mod webhook;

pub use config::WebhookConfig;
pub use dispatcher::{DispatchStats, NotificationDispatcher};
pub use error::NotifyError;
pub use mock::{FailingNotifier, RecordingNotifier};
pub use notifier::Notifier;
pub use payload::{ImageKind, NotificationImage, NotificationPayload};
pub use webhook::WebhookNotifier;
