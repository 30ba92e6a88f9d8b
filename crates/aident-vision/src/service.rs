//! Vision service abstraction.

use aident_models::{FaceSearchResults, JobId, LabelDetectionResults};
use async_trait::async_trait;

use crate::error::VisionResult;
use crate::requests::{FaceSearchRequest, LabelDetectionRequest};

/// Asynchronous video analysis operations used by the detection functions.
///
/// Implemented by [`crate::RekognitionVision`]; handlers depend on the trait
/// so they can run against in-memory fakes.
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Start a label detection job and return its id.
    async fn start_label_detection(&self, request: &LabelDetectionRequest) -> VisionResult<JobId>;

    /// Start a face search job and return its id.
    async fn start_face_search(&self, request: &FaceSearchRequest) -> VisionResult<JobId>;

    /// Fetch every result page of a face search job.
    async fn get_face_search(&self, job_id: &JobId) -> VisionResult<FaceSearchResults>;

    /// Fetch every result page of a label detection job.
    async fn get_label_detection(&self, job_id: &JobId) -> VisionResult<LabelDetectionResults>;
}
