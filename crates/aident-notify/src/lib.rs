//! Outbound notification channels.
//!
//! This crate provides:
//! - SNS topic publishing
//! - Facebook Messenger broadcast relay (message creative + broadcast)
//! - Publish counters

pub mod error;
pub mod messenger;
pub mod metrics;
pub mod publisher;
pub mod sns;

pub use error::{NotifyError, NotifyResult};
pub use messenger::{MessengerClient, MessengerConfig, DEFAULT_GRAPH_API_URL};
pub use publisher::{BroadcastReceipt, ChatBroadcaster, TopicPublisher};
pub use sns::SnsPublisher;
