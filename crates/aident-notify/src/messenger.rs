//! Facebook Messenger broadcast relay.
//!
//! Broadcasting is a two step exchange with the Graph API: the text is first
//! registered as a message creative, then a broadcast referencing the
//! creative id is submitted. Neither step is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{NotifyError, NotifyResult};
use crate::metrics::{record_delivered, record_failed, CHANNEL_MESSENGER};
use crate::publisher::{BroadcastReceipt, ChatBroadcaster};

/// Graph API version the broadcast endpoints were built against.
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com/v2.11";

const MESSAGING_TYPE: &str = "MESSAGE_TAG";
const BROADCAST_TAG: &str = "NON_PROMOTIONAL_SUBSCRIPTION";

/// Configuration for the Messenger client.
#[derive(Debug, Clone)]
pub struct MessengerConfig {
    /// Graph API base URL, without a trailing slash
    pub base_url: String,
    /// Page access token
    pub access_token: String,
    /// Request timeout
    pub timeout: Duration,
}

impl MessengerConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_GRAPH_API_URL.to_string(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreativeRequest<'a> {
    messages: Vec<CreativeText<'a>>,
}

#[derive(Debug, Serialize)]
struct CreativeText<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreativeResponse {
    message_creative_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct BroadcastRequest<'a> {
    message_creative_id: &'a str,
    messaging_type: &'a str,
    tag: &'a str,
}

#[derive(Debug, Deserialize)]
struct BroadcastResponse {
    broadcast_id: Option<String>,
}

/// Client for the Messenger broadcast API.
pub struct MessengerClient {
    http: Client,
    config: MessengerConfig,
}

impl MessengerClient {
    pub fn new(config: MessengerConfig) -> NotifyResult<Self> {
        if config.access_token.is_empty() {
            return Err(NotifyError::config_error("Messenger access token is empty"));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(NotifyError::Network)?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/me/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Register `text` as a message creative and return its id.
    pub async fn create_message_creative(&self, text: &str) -> NotifyResult<String> {
        let body = CreativeRequest {
            messages: vec![CreativeText { text }],
        };

        let response = self
            .http
            .post(self.endpoint("message_creatives"))
            .query(&[("access_token", self.config.access_token.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::from_http_status(status.as_u16(), body));
        }

        let creative: CreativeResponse = response.json().await?;
        let creative_id = creative
            .message_creative_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NotifyError::invalid_response("missing message_creative_id"))?;

        debug!(message_creative_id = %creative_id, status = status.as_u16(), "Message creative registered");
        Ok(creative_id)
    }

    /// Broadcast a registered creative to subscribers.
    pub async fn send_broadcast(&self, message_creative_id: &str) -> NotifyResult<Option<String>> {
        let body = BroadcastRequest {
            message_creative_id,
            messaging_type: MESSAGING_TYPE,
            tag: BROADCAST_TAG,
        };

        let response = self
            .http
            .post(self.endpoint("broadcast_messages"))
            .query(&[("access_token", self.config.access_token.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(NotifyError::from_http_status(status.as_u16(), text));
        }

        // The broadcast id is informational; an unexpected body is not a failure.
        let broadcast_id = serde_json::from_str::<BroadcastResponse>(&text)
            .ok()
            .and_then(|r| r.broadcast_id);

        debug!(status = status.as_u16(), "Broadcast response: {}", text);
        Ok(broadcast_id)
    }

    async fn relay(&self, text: &str) -> NotifyResult<BroadcastReceipt> {
        let message_creative_id = self.create_message_creative(text).await?;
        let broadcast_id = self.send_broadcast(&message_creative_id).await?;
        Ok(BroadcastReceipt {
            message_creative_id,
            broadcast_id,
        })
    }
}

#[async_trait]
impl ChatBroadcaster for MessengerClient {
    async fn broadcast(&self, text: &str) -> NotifyResult<BroadcastReceipt> {
        let result = self.relay(text).await;

        match &result {
            Ok(receipt) => {
                record_delivered(CHANNEL_MESSENGER);
                info!(
                    message_creative_id = %receipt.message_creative_id,
                    broadcast_id = ?receipt.broadcast_id,
                    "Broadcast sent to Messenger"
                );
            }
            Err(_) => record_failed(CHANNEL_MESSENGER),
        }

        result
    }
}
