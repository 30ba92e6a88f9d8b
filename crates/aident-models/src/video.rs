//! Video object references.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A video stored in S3, as referenced by Rekognition requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoObject {
    pub bucket: String,
    pub key: String,
}

impl VideoObject {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Build from a raw key as it appears in an S3 event notification.
    pub fn from_event_key(bucket: impl Into<String>, raw_key: &str) -> Result<Self, VideoKeyError> {
        Ok(Self::new(bucket, decode_object_key(raw_key)?))
    }
}

impl fmt::Display for VideoObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[derive(Debug, Error)]
pub enum VideoKeyError {
    #[error("Object key is empty")]
    Empty,

    #[error("Object key is not valid UTF-8 after decoding: {0}")]
    InvalidEncoding(String),
}

/// Decode an S3 event object key.
///
/// Event keys are form-encoded: spaces arrive as `+` and other reserved
/// characters are percent-encoded.
pub fn decode_object_key(raw: &str) -> Result<String, VideoKeyError> {
    if raw.is_empty() {
        return Err(VideoKeyError::Empty);
    }

    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|key| key.into_owned())
        .map_err(|e| VideoKeyError::InvalidEncoding(e.to_string()))
}
