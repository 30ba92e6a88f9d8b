//! Notification channel traits.

use async_trait::async_trait;

use crate::error::NotifyResult;

/// Publishes plain-text messages to a topic.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publish `message` to `topic_arn`, returning the message id when the
    /// service reports one.
    async fn publish(&self, topic_arn: &str, message: &str) -> NotifyResult<Option<String>>;
}

/// Broadcasts plain-text messages to chat subscribers.
#[async_trait]
pub trait ChatBroadcaster: Send + Sync {
    async fn broadcast(&self, text: &str) -> NotifyResult<BroadcastReceipt>;
}

/// Identifiers returned by a completed broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReceipt {
    pub message_creative_id: String,
    pub broadcast_id: Option<String>,
}
