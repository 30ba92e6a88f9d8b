//! Rekognition job identifiers and status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by Rekognition to an asynchronous video job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status reported for a video job, either in the completion notification
/// or in the `Get*` result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InProgress,
    Succeeded,
    Failed,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Error => "ERROR",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse the status strings used by both the notification body and the SDK.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            "ERROR" => JobStatus::Error,
            _ => JobStatus::Unknown,
        }
    }

    /// True when the job produced results that can be fetched.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_is_transparent() {
        let id: JobId = serde_json::from_str("\"job-123\"").unwrap();
        assert_eq!(id.as_str(), "job-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-123\"");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(JobStatus::parse("SUCCEEDED"), JobStatus::Succeeded);
        assert_eq!(JobStatus::parse("failed"), JobStatus::Failed);
        assert_eq!(JobStatus::parse("whatever"), JobStatus::Unknown);
        assert!(JobStatus::Succeeded.is_success());
        assert!(!JobStatus::Error.is_success());
    }

    #[test]
    fn test_status_deserialize_unknown() {
        let status: JobStatus = serde_json::from_str("\"PARTIAL_SUCCESS\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        let status: JobStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, JobStatus::InProgress);
    }
}
