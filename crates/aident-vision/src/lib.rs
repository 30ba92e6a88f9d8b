//! Amazon Rekognition Video client.
//!
//! This crate provides:
//! - Request construction for label detection and face search jobs
//! - A `VisionService` trait over the asynchronous video APIs
//! - The Rekognition SDK implementation, including result pagination

pub mod error;
pub mod rekognition;
pub mod requests;
pub mod service;

pub use error::{VisionError, VisionResult};
pub use rekognition::RekognitionVision;
pub use requests::{
    DetectionRequestBuilder, DetectionRequests, DetectionSettings, FaceSearchRequest,
    LabelDetectionRequest, NotificationTarget, FACE_SEARCH_JOB_TAG, LABEL_DETECTION_JOB_TAG,
};
pub use service::VisionService;
