//! Rekognition job completion notifications delivered through SNS.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{JobId, JobStatus};

/// Video API that started the job, as named in the notification `API` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoApi {
    StartFaceSearch,
    StartLabelDetection,
    #[serde(untagged)]
    Other(String),
}

/// Body of the SNS message Rekognition publishes when a video job ends.
///
/// Only `JobId` is guaranteed; the remaining fields are present on
/// notifications sent by Rekognition itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobNotification {
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, rename = "API", skip_serializing_if = "Option::is_none")]
    pub api: Option<VideoApi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tag: Option<String>,
    /// Completion time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid job notification: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Job notification has an empty JobId")]
    EmptyJobId,
}

impl JobNotification {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: JobId::from_string(job_id),
            status: None,
            api: None,
            job_tag: None,
            timestamp: None,
        }
    }

    /// Parse an SNS message body.
    pub fn parse(message: &str) -> Result<Self, NotificationError> {
        let notification: Self = serde_json::from_str(message)?;
        if notification.job_id.as_str().is_empty() {
            return Err(NotificationError::EmptyJobId);
        }
        Ok(notification)
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// True unless the notification explicitly reports an unsuccessful job.
    pub fn is_success(&self) -> bool {
        self.status.as_ref().map_or(true, JobStatus::is_success)
    }

    /// Face search completions include notifications without an `API` field.
    pub fn is_face_search(&self) -> bool {
        matches!(self.api, None | Some(VideoApi::StartFaceSearch))
    }

    pub fn is_label_detection(&self) -> bool {
        matches!(self.api, Some(VideoApi::StartLabelDetection))
    }
}
