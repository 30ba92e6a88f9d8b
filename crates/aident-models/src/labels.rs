//! Label detection summaries.

use serde::{Deserialize, Serialize};

use crate::JobStatus;

/// Labels returned by `GetLabelDetection`, in result order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDetectionResults {
    pub status: Option<JobStatus>,
    pub labels: Vec<String>,
}

/// Labels that indicate violent activity in a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousLabels(Vec<String>);

impl Default for SuspiciousLabels {
    fn default() -> Self {
        Self::new(["kicking", "punching", "fighting", "martial art", "wrestling"])
    }
}

impl SuspiciousLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated list, e.g. `kicking, punching`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.0.iter().any(|l| *l == label)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Distinct labels seen in a video and the suspicious subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSummary {
    pub labels: Vec<String>,
    pub suspicious: Vec<String>,
}

impl LabelSummary {
    pub fn from_labels<'a>(
        labels: impl IntoIterator<Item = &'a str>,
        suspicious: &SuspiciousLabels,
    ) -> Self {
        let mut summary = Self::default();
        for label in labels {
            if summary.labels.iter().any(|l| l == label) {
                continue;
            }
            summary.labels.push(label.to_string());
            if suspicious.contains(label) {
                summary.suspicious.push(label.to_string());
            }
        }
        summary
    }

    pub fn has_suspicious(&self) -> bool {
        !self.suspicious.is_empty()
    }

    /// Alert text for the suspicious labels, `None` when nothing matched.
    pub fn alert_message(&self) -> Option<String> {
        if !self.has_suspicious() {
            return None;
        }
        Some(format!(
            "Suspicious activity detected with label: {}",
            self.suspicious.join(" / ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let labels = SuspiciousLabels::default();
        assert!(labels.contains("Fighting"));
        assert!(labels.contains("Martial Art"));
        assert!(!labels.contains("Person"));
    }

    #[test]
    fn test_parse_list() {
        let labels = SuspiciousLabels::parse(" Kicking ,, Gun");
        assert_eq!(labels.as_slice(), ["kicking".to_string(), "gun".to_string()]);
    }

    #[test]
    fn test_summary_dedupes_and_flags() {
        let found = ["Person", "Person", "Punching", "Car", "Punching", "Wrestling"];
        let summary = LabelSummary::from_labels(found, &SuspiciousLabels::default());

        assert_eq!(summary.labels, vec!["Person", "Punching", "Car", "Wrestling"]);
        assert_eq!(summary.suspicious, vec!["Punching", "Wrestling"]);
        assert_eq!(
            summary.alert_message().unwrap(),
            "Suspicious activity detected with label: Punching / Wrestling"
        );
    }

    #[test]
    fn test_no_alert_without_suspicious_labels() {
        let summary = LabelSummary::from_labels(["Person", "Car"], &SuspiciousLabels::default());
        assert!(!summary.has_suspicious());
        assert!(summary.alert_message().is_none());
    }
}
