//! Notification error types.

use thiserror::Error;

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to configure notifier: {0}")]
    ConfigError(String),

    #[error("SNS publish failed: {0}")]
    PublishFailed(String),

    #[error("Messenger API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NotifyError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn publish_failed(msg: impl Into<String>) -> Self {
        Self::PublishFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            NotifyError::Api { status, .. } => Some(*status),
            NotifyError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_getter() {
        assert_eq!(NotifyError::from_http_status(400, "bad").http_status(), Some(400));
        assert_eq!(NotifyError::publish_failed("denied").http_status(), None);
    }

    #[test]
    fn test_display() {
        let err = NotifyError::from_http_status(403, "{\"error\":\"token\"}");
        assert_eq!(err.to_string(), "Messenger API returned 403: {\"error\":\"token\"}");
    }
}
