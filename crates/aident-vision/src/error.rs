//! Vision service error types.

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while talking to Rekognition.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to start {operation}: {message}")]
    StartFailed { operation: &'static str, message: String },

    #[error("Failed to fetch results for job {job_id}: {message}")]
    FetchFailed { job_id: String, message: String },

    #[error("Response missing job id for {0}")]
    MissingJobId(&'static str),
}

impl VisionError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn start_failed(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::StartFailed {
            operation,
            message: msg.into(),
        }
    }

    pub fn fetch_failed(job_id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::FetchFailed {
            job_id: job_id.into(),
            message: msg.into(),
        }
    }
}
