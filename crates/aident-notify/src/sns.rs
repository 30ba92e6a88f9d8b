//! SNS topic publisher.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_types::SdkConfig;
use tracing::{debug, info};

use crate::error::{NotifyError, NotifyResult};
use crate::metrics::{record_delivered, record_failed, CHANNEL_SNS};
use crate::publisher::TopicPublisher;

/// Publishes messages through Amazon SNS.
#[derive(Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Create a publisher from a loaded AWS configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl TopicPublisher for SnsPublisher {
    async fn publish(&self, topic_arn: &str, message: &str) -> NotifyResult<Option<String>> {
        debug!("Publishing {} bytes to {}", message.len(), topic_arn);

        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                record_failed(CHANNEL_SNS);
                NotifyError::publish_failed(e.to_string())
            })?;

        record_delivered(CHANNEL_SNS);
        let message_id = output.message_id().map(str::to_string);
        info!(topic_arn = %topic_arn, message_id = ?message_id, "Published message to SNS");
        Ok(message_id)
    }
}
