//! Extraction of domain values from Lambda trigger events.

use aident_models::{JobNotification, VideoObject};
use aws_lambda_events::event::s3::S3Event;
use aws_lambda_events::event::sns::SnsEvent;

use crate::error::{AppError, AppResult};

/// Video objects referenced by an S3 upload event.
///
/// `bucket_override` replaces the bucket named in each record.
pub fn videos_from_s3_event(
    event: &S3Event,
    bucket_override: Option<&str>,
) -> AppResult<Vec<VideoObject>> {
    if event.records.is_empty() {
        return Err(AppError::invalid_event("S3 event has no records"));
    }

    event
        .records
        .iter()
        .map(|record| -> AppResult<VideoObject> {
            let raw_key = record
                .s3
                .object
                .key
                .as_deref()
                .ok_or_else(|| AppError::invalid_event("S3 record has no object key"))?;

            let bucket = match bucket_override {
                Some(bucket) => bucket,
                None => record
                    .s3
                    .bucket
                    .name
                    .as_deref()
                    .ok_or_else(|| AppError::invalid_event("S3 record has no bucket name"))?,
            };

            Ok(VideoObject::from_event_key(bucket, raw_key)?)
        })
        .collect()
}

/// Job notifications carried by an SNS event.
pub fn notifications_from_sns_event(event: &SnsEvent) -> AppResult<Vec<JobNotification>> {
    if event.records.is_empty() {
        return Err(AppError::invalid_event("SNS event has no records"));
    }

    event
        .records
        .iter()
        .map(|record| JobNotification::parse(&record.sns.message).map_err(AppError::from))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{s3_event, sns_event};
    use super::*;
    use aident_models::VideoApi;

    #[test]
    fn test_videos_use_event_bucket() {
        let event = s3_event(&[("clips", "video1.mp4")]);
        let videos = videos_from_s3_event(&event, None).unwrap();
        assert_eq!(videos, vec![VideoObject::new("clips", "video1.mp4")]);
    }

    #[test]
    fn test_videos_bucket_override_and_decoding() {
        let event = s3_event(&[("other", "night+shift%2Fcam1.mp4"), ("other", "b.mp4")]);
        let videos = videos_from_s3_event(&event, Some("clips")).unwrap();

        assert_eq!(
            videos,
            vec![
                VideoObject::new("clips", "night shift/cam1.mp4"),
                VideoObject::new("clips", "b.mp4"),
            ]
        );
    }

    #[test]
    fn test_empty_s3_event_rejected() {
        assert!(matches!(
            videos_from_s3_event(&S3Event::default(), None),
            Err(AppError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_missing_key_rejected() {
        let mut event = s3_event(&[("clips", "a.mp4")]);
        event.records[0].s3.object.key = None;
        assert!(matches!(
            videos_from_s3_event(&event, None),
            Err(AppError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_notifications_parsed() {
        let event = sns_event(&[
            r#"{"JobId":"job-123"}"#,
            r#"{"JobId":"job-456","Status":"SUCCEEDED","API":"StartLabelDetection"}"#,
        ]);
        let notifications = notifications_from_sns_event(&event).unwrap();

        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].job_id.as_str(), "job-123");
        assert_eq!(notifications[1].api, Some(VideoApi::StartLabelDetection));
    }

    #[test]
    fn test_bad_notification_rejected() {
        let event = sns_event(&["{}"]);
        assert!(matches!(
            notifications_from_sns_event(&event),
            Err(AppError::Notification(_))
        ));
        assert!(matches!(
            notifications_from_sns_event(&sns_event(&[])),
            Err(AppError::InvalidEvent(_))
        ));
    }
}
