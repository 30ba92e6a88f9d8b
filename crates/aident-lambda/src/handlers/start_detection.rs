//! Detection starter: S3 upload → Rekognition label detection and face search.

use aident_models::{JobId, VideoObject};
use aident_vision::{DetectionRequestBuilder, VisionService};
use aws_lambda_events::event::s3::S3Event;
use tracing::{debug, error, info};

use crate::config::StarterConfig;
use crate::error::AppResult;
use crate::events::videos_from_s3_event;

/// Jobs started for one uploaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedJobs {
    pub video: VideoObject,
    pub label_detection: JobId,
    pub face_search: Option<JobId>,
}

/// Start detection jobs for every object in an upload event.
pub async fn handle_upload(
    config: &StarterConfig,
    vision: &dyn VisionService,
    event: &S3Event,
) -> AppResult<Vec<StartedJobs>> {
    let videos = videos_from_s3_event(event, config.bucket_name.as_deref())?;

    let mut started = Vec::with_capacity(videos.len());
    for video in &videos {
        started.push(start_detection(config, vision, video).await?);
    }
    Ok(started)
}

/// Submit label detection and, when a collection is configured, face search.
///
/// Both requests are submitted even if the first one fails; the invocation
/// still fails when either submission did.
pub async fn start_detection(
    config: &StarterConfig,
    vision: &dyn VisionService,
    video: &VideoObject,
) -> AppResult<StartedJobs> {
    info!(video = %video, "Starting detection jobs");

    let requests = DetectionRequestBuilder::new(&config.detection).build(video);

    let label_detection = vision
        .start_label_detection(&requests.label_detection)
        .await
        .inspect_err(|e| error!(video = %video, "Label detection request failed: {}", e));

    let face_search = match &requests.face_search {
        Some(request) => Some(
            vision
                .start_face_search(request)
                .await
                .inspect_err(|e| error!(video = %video, "Face search request failed: {}", e)),
        ),
        None => {
            debug!("No face collection configured, skipping face search");
            None
        }
    };

    let label_detection = label_detection?;
    let face_search = face_search.transpose()?;

    info!(
        video = %video,
        label_detection_job_id = %label_detection,
        face_search_job_id = ?face_search.as_ref().map(JobId::as_str),
        "Detection jobs started"
    );

    Ok(StartedJobs {
        video: video.clone(),
        label_detection,
        face_search,
    })
}
