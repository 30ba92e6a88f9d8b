//! Function configuration.
//!
//! Each binary reads its configuration once at cold start and passes it by
//! reference into the handler.

use std::time::Duration;

use aident_models::{ReportStyle, SuspiciousLabels};
use aident_notify::{MessengerConfig, DEFAULT_GRAPH_API_URL};
use aident_vision::DetectionSettings;

use crate::error::{AppError, AppResult};

const DEFAULT_MIN_CONFIDENCE: f32 = 50.0;
const DEFAULT_MESSENGER_TIMEOUT_SECS: u64 = 30;

/// Configuration for the detection starter.
#[derive(Debug, Clone)]
pub struct StarterConfig {
    /// AWS region; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Bucket to reference instead of the one named in the event
    pub bucket_name: Option<String>,
    /// Rekognition request settings
    pub detection: DetectionSettings,
}

impl StarterConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let min_confidence = match optional(&lookup, "LABEL_MIN_CONFIDENCE") {
            Some(raw) => parse_confidence(&raw)?,
            None => DEFAULT_MIN_CONFIDENCE,
        };

        Ok(Self {
            region: optional(&lookup, "REGION"),
            bucket_name: optional(&lookup, "S3_BUCKET_NAME"),
            detection: DetectionSettings {
                label_topic_arn: required(&lookup, "SNS_TOPIC_ARN")?,
                face_search_topic_arn: optional(&lookup, "FACE_SEARCH_TOPIC_ARN"),
                role_arn: required(&lookup, "REKOGNITION_ROLE_ARN")?,
                collection_id: optional(&lookup, "COLLECTION_ID"),
                min_confidence,
            },
        })
    }
}

/// Configuration for the job completion processor.
#[derive(Clone)]
pub struct CompletionConfig {
    /// AWS region; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Topic reports and alerts are published to
    pub target_topic_arn: String,
    pub report_style: ReportStyle,
    pub suspicious_labels: SuspiciousLabels,
    /// Messenger relay settings; the relay is disabled when absent
    pub messenger: Option<MessengerConfig>,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("region", &self.region)
            .field("target_topic_arn", &self.target_topic_arn)
            .field("report_style", &self.report_style)
            .field("suspicious_labels", &self.suspicious_labels)
            .field("messenger_enabled", &self.messenger.is_some())
            .finish()
    }
}

impl CompletionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let report_style = match optional(&lookup, "REPORT_STYLE") {
            Some(raw) => raw.parse().map_err(AppError::config_error)?,
            None => ReportStyle::default(),
        };

        let suspicious_labels = optional(&lookup, "SUSPICIOUS_LABELS")
            .map(|raw| SuspiciousLabels::parse(&raw))
            .unwrap_or_default();

        let messenger = match optional(&lookup, "FB_MESSENGER_ACCESS_TOKEN") {
            Some(access_token) => {
                let timeout_secs = match optional(&lookup, "MESSENGER_TIMEOUT_SECS") {
                    Some(raw) => parse_timeout_secs(&raw)?,
                    None => DEFAULT_MESSENGER_TIMEOUT_SECS,
                };
                Some(MessengerConfig {
                    base_url: optional(&lookup, "FB_GRAPH_API_URL")
                        .unwrap_or_else(|| DEFAULT_GRAPH_API_URL.to_string()),
                    access_token,
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            region: optional(&lookup, "REGION"),
            target_topic_arn: required(&lookup, "TARGET_SNS_TOPIC_ARN")?,
            report_style,
            suspicious_labels,
            messenger,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Blank values count as unset.
fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    optional(lookup, name).ok_or_else(|| AppError::config_error(format!("{} not set", name)))
}

fn parse_confidence(raw: &str) -> AppResult<f32> {
    let value: f32 = raw.parse().map_err(|_| {
        AppError::config_error(format!("LABEL_MIN_CONFIDENCE is not a number: {}", raw))
    })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::config_error(format!(
            "LABEL_MIN_CONFIDENCE must be between 0 and 100, got {}",
            value
        )));
    }
    Ok(value)
}

fn parse_timeout_secs(raw: &str) -> AppResult<u64> {
    let secs: u64 = raw.parse().map_err(|_| {
        AppError::config_error(format!("MESSENGER_TIMEOUT_SECS is not a number: {}", raw))
    })?;
    if secs == 0 {
        return Err(AppError::config_error("MESSENGER_TIMEOUT_SECS must be at least 1"));
    }
    Ok(secs)
}
