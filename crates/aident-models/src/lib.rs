//! Shared data models for the Aident detection functions.
//!
//! This crate provides plain, serializable types for:
//! - Rekognition job references and completion notifications
//! - Video object references derived from S3 uploads
//! - Face match aggregation (best match per subject)
//! - Label detection summaries
//! - Report rendering

pub mod detection;
pub mod job;
pub mod labels;
pub mod notification;
pub mod report;
pub mod video;

pub use detection::{BestMatchMap, DetectionGroup, FaceSearchResults, MatchRecord};
pub use job::{JobId, JobStatus};
pub use labels::{LabelDetectionResults, LabelSummary, SuspiciousLabels};
pub use notification::{JobNotification, NotificationError, VideoApi};
pub use report::{Report, ReportStyle};
pub use video::{decode_object_key, VideoKeyError, VideoObject};
