//! Job completion processor: Rekognition notification → report → SNS / Messenger.

use aident_models::{
    BestMatchMap, JobId, JobNotification, JobStatus, LabelSummary, Report, VideoApi,
};
use aident_notify::{ChatBroadcaster, TopicPublisher};
use aident_vision::VisionService;
use aws_lambda_events::event::sns::SnsEvent;
use tracing::info;

use crate::config::CompletionConfig;
use crate::error::{AppError, AppResult};
use crate::events::notifications_from_sns_event;
use crate::logging::JobLogger;

/// Clients used while processing a completion.
#[derive(Clone, Copy)]
pub struct CompletionServices<'a> {
    pub vision: &'a dyn VisionService,
    pub publisher: &'a dyn TopicPublisher,
    /// Messenger relay; `None` disables chat broadcast
    pub chat: Option<&'a dyn ChatBroadcaster>,
}

/// What a single notification produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// Face search report, published to every configured channel
    FaceSearchReport(Report),
    /// Label summary; an alert was published when it has suspicious labels
    LabelSummary(LabelSummary),
    /// Notification for an API this function does not handle
    Skipped,
}

/// Process every notification in an SNS event, stopping at the first error.
pub async fn handle_job_completion(
    config: &CompletionConfig,
    services: CompletionServices<'_>,
    event: &SnsEvent,
) -> AppResult<Vec<CompletionOutcome>> {
    let notifications = notifications_from_sns_event(event)?;

    let mut outcomes = Vec::with_capacity(notifications.len());
    for notification in &notifications {
        outcomes.push(process_notification(config, services, notification).await?);
    }
    Ok(outcomes)
}

/// Route a notification to the face search or label detection processor.
///
/// Notifications without an `API` field are face search completions.
pub async fn process_notification(
    config: &CompletionConfig,
    services: CompletionServices<'_>,
    notification: &JobNotification,
) -> AppResult<CompletionOutcome> {
    let job_id = &notification.job_id;

    if !notification.is_face_search() && !notification.is_label_detection() {
        let api = match &notification.api {
            Some(VideoApi::Other(name)) => name.as_str(),
            _ => "unknown",
        };
        JobLogger::new(job_id, "job_completion")
            .log_warning(&format!("unsupported API {}, skipping", api));
        return Ok(CompletionOutcome::Skipped);
    }

    if let Some(at) = notification.completed_at() {
        info!(job_id = %job_id, tag = ?notification.job_tag, "Job finished at {}", at.to_rfc3339());
    }

    if !notification.is_success() {
        let status = notification.status.clone().unwrap_or(JobStatus::Unknown);
        return Err(AppError::job_failed(job_id, status));
    }

    if notification.is_label_detection() {
        let summary = process_label_detection(config, services, job_id).await?;
        Ok(CompletionOutcome::LabelSummary(summary))
    } else {
        let report = process_face_search(config, services, job_id).await?;
        Ok(CompletionOutcome::FaceSearchReport(report))
    }
}

/// Build the best-match report for a face search job and deliver it.
///
/// An empty result set still produces and publishes a report.
pub async fn process_face_search(
    config: &CompletionConfig,
    services: CompletionServices<'_>,
    job_id: &JobId,
) -> AppResult<Report> {
    let logger = JobLogger::new(job_id, "face_search");
    logger.log_start("fetching face search results");

    let results = services.vision.get_face_search(job_id).await?;
    ensure_succeeded(job_id, results.status.as_ref())?;
    logger.log_progress(&format!(
        "{} detection groups, {} matches",
        results.groups.len(),
        results.match_count()
    ));

    let best_matches = BestMatchMap::from_groups(&results.groups);
    let report = Report::render(job_id, &best_matches, config.report_style);
    info!(job_id = %job_id, subjects = best_matches.len(), "{}", report);

    services
        .publisher
        .publish(&config.target_topic_arn, report.as_str())
        .await
        .inspect_err(|e| logger.log_error(&e.to_string()))?;

    if let Some(chat) = services.chat {
        chat.broadcast(report.as_str())
            .await
            .inspect_err(|e| logger.log_error(&e.to_string()))?;
    }

    logger.log_completion("report delivered");
    Ok(report)
}

/// Summarise a label detection job and publish an alert for suspicious labels.
pub async fn process_label_detection(
    config: &CompletionConfig,
    services: CompletionServices<'_>,
    job_id: &JobId,
) -> AppResult<LabelSummary> {
    let logger = JobLogger::new(job_id, "label_detection");
    logger.log_start("fetching label detection results");

    let results = services.vision.get_label_detection(job_id).await?;
    ensure_succeeded(job_id, results.status.as_ref())?;

    let summary = LabelSummary::from_labels(
        results.labels.iter().map(String::as_str),
        &config.suspicious_labels,
    );
    logger.log_progress(&format!(
        "{} labels: {}",
        summary.labels.len(),
        summary.labels.join(" / ")
    ));

    match summary.alert_message() {
        Some(alert) => {
            services
                .publisher
                .publish(&config.target_topic_arn, &alert)
                .await?;
            logger.log_completion(&format!(
                "{} suspicious labels reported",
                summary.suspicious.len()
            ));
        }
        None => logger.log_completion("no suspicious labels"),
    }

    Ok(summary)
}

/// Results are usable only from a succeeded job; an absent status is accepted.
fn ensure_succeeded(job_id: &JobId, status: Option<&JobStatus>) -> AppResult<()> {
    match status {
        None | Some(JobStatus::Succeeded) => Ok(()),
        Some(status) => Err(AppError::job_failed(job_id, status.clone())),
    }
}
