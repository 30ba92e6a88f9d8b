//! Detection request construction.
//!
//! Requests are plain values so they can be inspected and logged before
//! being translated into SDK calls by [`crate::RekognitionVision`].

use aident_models::VideoObject;

/// Job tag attached to label detection jobs.
pub const LABEL_DETECTION_JOB_TAG: &str = "AidentStartLabelDetection";

/// Job tag attached to face search jobs.
pub const FACE_SEARCH_JOB_TAG: &str = "AidentStartFaceSearch";

/// SNS topic Rekognition notifies on completion, and the role it assumes to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub topic_arn: String,
    pub role_arn: String,
}

/// Settings shared by every detection request.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    /// Callback topic for label detection
    pub label_topic_arn: String,
    /// Callback topic for face search; falls back to `label_topic_arn`
    pub face_search_topic_arn: Option<String>,
    /// Role Rekognition assumes to publish to the topics
    pub role_arn: String,
    /// Face collection to search; face search is skipped without one
    pub collection_id: Option<String>,
    /// Minimum label confidence (0-100)
    pub min_confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelDetectionRequest {
    pub video: VideoObject,
    pub min_confidence: f32,
    pub job_tag: String,
    pub notification: NotificationTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceSearchRequest {
    pub video: VideoObject,
    pub collection_id: String,
    pub job_tag: String,
    pub notification: NotificationTarget,
}

/// The requests issued for one uploaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequests {
    pub label_detection: LabelDetectionRequest,
    pub face_search: Option<FaceSearchRequest>,
}

/// Builds Rekognition requests for uploaded videos.
#[derive(Debug, Clone)]
pub struct DetectionRequestBuilder<'a> {
    settings: &'a DetectionSettings,
}

impl<'a> DetectionRequestBuilder<'a> {
    pub fn new(settings: &'a DetectionSettings) -> Self {
        Self { settings }
    }

    pub fn label_detection(&self, video: &VideoObject) -> LabelDetectionRequest {
        LabelDetectionRequest {
            video: video.clone(),
            min_confidence: self.settings.min_confidence,
            job_tag: LABEL_DETECTION_JOB_TAG.to_string(),
            notification: NotificationTarget {
                topic_arn: self.settings.label_topic_arn.clone(),
                role_arn: self.settings.role_arn.clone(),
            },
        }
    }

    pub fn face_search(&self, video: &VideoObject) -> Option<FaceSearchRequest> {
        let collection_id = self.settings.collection_id.as_ref()?;
        let topic_arn = self
            .settings
            .face_search_topic_arn
            .as_ref()
            .unwrap_or(&self.settings.label_topic_arn);

        Some(FaceSearchRequest {
            video: video.clone(),
            collection_id: collection_id.clone(),
            job_tag: FACE_SEARCH_JOB_TAG.to_string(),
            notification: NotificationTarget {
                topic_arn: topic_arn.clone(),
                role_arn: self.settings.role_arn.clone(),
            },
        })
    }

    pub fn build(&self, video: &VideoObject) -> DetectionRequests {
        DetectionRequests {
            label_detection: self.label_detection(video),
            face_search: self.face_search(video),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DetectionSettings {
        DetectionSettings {
            label_topic_arn: "arn:aws:sns:ap-northeast-2:123:labels".to_string(),
            face_search_topic_arn: Some("arn:aws:sns:ap-northeast-2:123:faces".to_string()),
            role_arn: "arn:aws:iam::123:role/rekognition".to_string(),
            collection_id: Some("crimedb".to_string()),
            min_confidence: 50.0,
        }
    }

    #[test]
    fn test_both_requests_reference_same_video() {
        let settings = settings();
        let video = VideoObject::new("clips", "video1.mp4");
        let requests = DetectionRequestBuilder::new(&settings).build(&video);
        let face_search = requests.face_search.unwrap();

        assert_eq!(requests.label_detection.video, video);
        assert_eq!(face_search.video, video);
        assert_eq!(face_search.collection_id, "crimedb");
    }

    #[test]
    fn test_tags_and_channels() {
        let settings = settings();
        let requests = DetectionRequestBuilder::new(&settings).build(&VideoObject::new("b", "k"));
        let label = &requests.label_detection;
        let face = requests.face_search.as_ref().unwrap();

        assert_eq!(label.job_tag, LABEL_DETECTION_JOB_TAG);
        assert_eq!(label.min_confidence, 50.0);
        assert_eq!(label.notification.topic_arn, settings.label_topic_arn);
        assert_eq!(face.job_tag, FACE_SEARCH_JOB_TAG);
        assert_eq!(face.notification.topic_arn, "arn:aws:sns:ap-northeast-2:123:faces");
        assert_eq!(face.notification.role_arn, label.notification.role_arn);
    }

    #[test]
    fn test_single_topic_falls_back_to_label_topic() {
        let settings = DetectionSettings {
            face_search_topic_arn: None,
            ..settings()
        };
        let face = DetectionRequestBuilder::new(&settings)
            .face_search(&VideoObject::new("b", "k"))
            .unwrap();
        assert_eq!(face.notification.topic_arn, settings.label_topic_arn);
    }

    #[test]
    fn test_face_search_disabled_without_collection() {
        let settings = DetectionSettings {
            collection_id: None,
            min_confidence: 0.0,
            ..settings()
        };
        let requests = DetectionRequestBuilder::new(&settings).build(&VideoObject::new("b", "k"));
        assert!(requests.face_search.is_none());
        assert_eq!(requests.label_detection.min_confidence, 0.0);
    }
}
