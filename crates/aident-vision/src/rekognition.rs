//! Rekognition Video implementation of [`VisionService`].

use std::future::Future;

use aident_models::{
    DetectionGroup, FaceSearchResults, JobId, JobStatus, LabelDetectionResults, MatchRecord,
    VideoObject,
};
use async_trait::async_trait;
use aws_sdk_rekognition::types::{
    FaceSearchSortBy, LabelDetectionSortBy, NotificationChannel, PersonMatch, S3Object, Video,
    VideoJobStatus,
};
use aws_sdk_rekognition::Client;
use aws_types::SdkConfig;
use tracing::{debug, info};

use crate::error::{VisionError, VisionResult};
use crate::requests::{FaceSearchRequest, LabelDetectionRequest, NotificationTarget};
use crate::service::VisionService;

/// Page size for `GetLabelDetection`.
const LABEL_PAGE_SIZE: i32 = 1000;

/// Page size for `GetFaceSearch`.
const FACE_SEARCH_PAGE_SIZE: i32 = 1000;

/// Rekognition Video client.
#[derive(Clone)]
pub struct RekognitionVision {
    client: Client,
}

impl RekognitionVision {
    /// Create a client from a loaded AWS configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl VisionService for RekognitionVision {
    async fn start_label_detection(&self, request: &LabelDetectionRequest) -> VisionResult<JobId> {
        debug!("Starting label detection for {}", request.video);

        let output = self
            .client
            .start_label_detection()
            .video(video(&request.video))
            .min_confidence(request.min_confidence)
            .job_tag(&request.job_tag)
            .notification_channel(notification_channel(&request.notification)?)
            .send()
            .await
            .map_err(|e| VisionError::start_failed("StartLabelDetection", e.to_string()))?;

        let job_id = output
            .job_id()
            .ok_or(VisionError::MissingJobId("StartLabelDetection"))?;

        info!(job_id = %job_id, video = %request.video, "Label detection started");
        Ok(JobId::from(job_id))
    }

    async fn start_face_search(&self, request: &FaceSearchRequest) -> VisionResult<JobId> {
        debug!(
            "Starting face search for {} in collection {}",
            request.video, request.collection_id
        );

        let output = self
            .client
            .start_face_search()
            .video(video(&request.video))
            .collection_id(&request.collection_id)
            .job_tag(&request.job_tag)
            .notification_channel(notification_channel(&request.notification)?)
            .send()
            .await
            .map_err(|e| VisionError::start_failed("StartFaceSearch", e.to_string()))?;

        let job_id = output
            .job_id()
            .ok_or(VisionError::MissingJobId("StartFaceSearch"))?;

        info!(job_id = %job_id, video = %request.video, "Face search started");
        Ok(JobId::from(job_id))
    }

    async fn get_face_search(&self, job_id: &JobId) -> VisionResult<FaceSearchResults> {
        let (status, groups) = collect_pages(|next_token| {
            let request = self
                .client
                .get_face_search()
                .job_id(job_id.as_str())
                .sort_by(FaceSearchSortBy::Index)
                .max_results(FACE_SEARCH_PAGE_SIZE)
                .set_next_token(next_token);

            async move {
                let response = request
                    .send()
                    .await
                    .map_err(|e| VisionError::fetch_failed(job_id.as_str(), e.to_string()))?;

                Ok::<_, VisionError>(Page {
                    status: response.job_status().map(job_status),
                    items: response.persons().iter().map(detection_group).collect(),
                    next_token: response.next_token().map(str::to_string),
                })
            }
        })
        .await?;

        let results = FaceSearchResults { status, groups };
        debug!(
            job_id = %job_id,
            groups = results.groups.len(),
            matches = results.match_count(),
            "Face search results fetched"
        );
        Ok(results)
    }

    async fn get_label_detection(&self, job_id: &JobId) -> VisionResult<LabelDetectionResults> {
        let (status, labels) = collect_pages(|next_token| {
            let request = self
                .client
                .get_label_detection()
                .job_id(job_id.as_str())
                .sort_by(LabelDetectionSortBy::Name)
                .max_results(LABEL_PAGE_SIZE)
                .set_next_token(next_token);

            async move {
                let response = request
                    .send()
                    .await
                    .map_err(|e| VisionError::fetch_failed(job_id.as_str(), e.to_string()))?;

                Ok::<_, VisionError>(Page {
                    status: response.job_status().map(job_status),
                    items: response
                        .labels()
                        .iter()
                        .filter_map(|d| d.label().and_then(|l| l.name()))
                        .map(str::to_string)
                        .collect(),
                    next_token: response.next_token().map(str::to_string),
                })
            }
        })
        .await?;

        debug!(job_id = %job_id, labels = labels.len(), "Label detection results fetched");
        Ok(LabelDetectionResults { status, labels })
    }
}

/// One page of a paginated `Get*` response.
struct Page<T> {
    status: Option<JobStatus>,
    items: Vec<T>,
    next_token: Option<String>,
}

/// Fetch pages until the service stops returning a continuation token.
///
/// The job status is taken from the first page that reports one.
async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> VisionResult<(Option<JobStatus>, Vec<T>)>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = VisionResult<Page<T>>>,
{
    let mut status = None;
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = fetch_page(next_token.take()).await?;

        if status.is_none() {
            status = page.status;
        }
        items.extend(page.items);

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok((status, items))
}

fn video(object: &VideoObject) -> Video {
    Video::builder()
        .s3_object(
            S3Object::builder()
                .bucket(&object.bucket)
                .name(&object.key)
                .build(),
        )
        .build()
}

fn notification_channel(target: &NotificationTarget) -> VisionResult<NotificationChannel> {
    NotificationChannel::builder()
        .sns_topic_arn(&target.topic_arn)
        .role_arn(&target.role_arn)
        .build()
        .map_err(|e| VisionError::invalid_request(e.to_string()))
}

fn job_status(status: &VideoJobStatus) -> JobStatus {
    JobStatus::parse(status.as_str())
}

/// Face matches of one person; matches missing a subject or score are dropped.
fn detection_group(person: &PersonMatch) -> DetectionGroup {
    let matches = person
        .face_matches()
        .iter()
        .filter_map(|face_match| {
            let subject = face_match.face()?.external_image_id()?;
            let similarity = face_match.similarity()?;
            Some(MatchRecord::new(subject, f64::from(similarity)))
        })
        .collect();

    DetectionGroup::new(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_rekognition::types::{Face, FaceMatch};

    fn face_match(subject: Option<&str>, similarity: Option<f32>) -> FaceMatch {
        let mut face = Face::builder();
        if let Some(subject) = subject {
            face = face.external_image_id(subject);
        }
        let mut builder = FaceMatch::builder().face(face.build());
        if let Some(similarity) = similarity {
            builder = builder.similarity(similarity);
        }
        builder.build()
    }

    #[test]
    fn test_video_reference() {
        let v = video(&VideoObject::new("clips", "video1.mp4"));
        let object = v.s3_object().unwrap();
        assert_eq!(object.bucket(), Some("clips"));
        assert_eq!(object.name(), Some("video1.mp4"));
    }

    #[test]
    fn test_notification_channel() {
        let channel = notification_channel(&NotificationTarget {
            topic_arn: "arn:topic".to_string(),
            role_arn: "arn:role".to_string(),
        })
        .unwrap();
        assert_eq!(channel.sns_topic_arn(), "arn:topic");
        assert_eq!(channel.role_arn(), "arn:role");
    }

    #[test]
    fn test_detection_group_keeps_complete_matches() {
        let person = PersonMatch::builder()
            .face_matches(face_match(Some("john-doe"), Some(88.0)))
            .face_matches(face_match(Some("john-doe"), Some(91.5)))
            .face_matches(face_match(None, Some(99.0)))
            .face_matches(face_match(Some("jane-roe"), None))
            .build();

        let group = detection_group(&person);
        assert_eq!(
            group.matches,
            vec![
                MatchRecord::new("john-doe", 88.0),
                MatchRecord::new("john-doe", 91.5)
            ]
        );
    }

    #[test]
    fn test_person_without_matches() {
        let group = detection_group(&PersonMatch::builder().build());
        assert!(group.is_empty());
    }

    fn page(items: &[&str], status: Option<JobStatus>, next: Option<&str>) -> Page<String> {
        Page {
            status,
            items: items.iter().map(|s| s.to_string()).collect(),
            next_token: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_collect_pages_follows_tokens() {
        let mut pages = vec![
            page(&["a", "b"], Some(JobStatus::Succeeded), Some("p2")),
            page(&[], None, Some("p3")),
            page(&["c"], Some(JobStatus::Failed), None),
        ]
        .into_iter();
        let mut tokens = Vec::new();

        let (status, items) = collect_pages(|token| {
            tokens.push(token);
            std::future::ready(Ok(pages.next().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(status, Some(JobStatus::Succeeded));
        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(
            tokens,
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_collect_pages_stops_on_empty_token() {
        let mut calls = 0;

        let (status, items) = collect_pages(|_| {
            calls += 1;
            std::future::ready(Ok(page(&["only"], None, Some(""))))
        })
        .await
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(status, None);
        assert_eq!(items, vec!["only"]);
    }

    #[tokio::test]
    async fn test_collect_pages_propagates_page_error() {
        let mut calls = 0;

        let result = collect_pages(|_| {
            calls += 1;
            std::future::ready(if calls == 1 {
                Ok(page(&["a"], Some(JobStatus::Succeeded), Some("p2")))
            } else {
                Err(VisionError::fetch_failed("job-1", "throttled"))
            })
        })
        .await;

        assert!(matches!(result, Err(VisionError::FetchFailed { .. })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_job_status_mapping() {
        assert_eq!(job_status(&VideoJobStatus::Succeeded), JobStatus::Succeeded);
        assert_eq!(job_status(&VideoJobStatus::InProgress), JobStatus::InProgress);
        assert_eq!(job_status(&VideoJobStatus::Failed), JobStatus::Failed);
    }
}
