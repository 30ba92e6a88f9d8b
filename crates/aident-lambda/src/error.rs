//! Function error types.

use aident_models::{JobId, JobStatus, NotificationError, VideoKeyError};
use aident_notify::NotifyError;
use aident_vision::VisionError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Any failure aborts the invocation; the Lambda platform decides on redelivery.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Job {job_id} finished with status {status}")]
    JobFailed { job_id: JobId, status: JobStatus },

    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("Invalid object key: {0}")]
    VideoKey(#[from] VideoKeyError),
}

impl AppError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }

    pub fn job_failed(job_id: &JobId, status: JobStatus) -> Self {
        Self::JobFailed {
            job_id: job_id.clone(),
            status,
        }
    }
}
