//! Plain-text face search reports.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::{BestMatchMap, JobId};

const NO_SUSPECT: &str = "There is no criminal suspect in this video";
const SUSPECT_HEADER: &str = "Detected criminal suspect:";

/// Layout of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// Job id line, then either the suspect list or a "no suspect" notice.
    #[default]
    Detailed,
    /// Suspect header and entries only, even when there are no entries.
    Compact,
}

impl ReportStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStyle::Detailed => "detailed",
            ReportStyle::Compact => "compact",
        }
    }
}

impl FromStr for ReportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detailed" => Ok(ReportStyle::Detailed),
            "compact" => Ok(ReportStyle::Compact),
            other => Err(format!("Unknown report style: {}", other)),
        }
    }
}

/// Rendered report text, used verbatim as the SNS and Messenger payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    /// Render the best matches of a face search job.
    pub fn render(job_id: &JobId, matches: &BestMatchMap, style: ReportStyle) -> Self {
        let mut out = String::new();

        if style == ReportStyle::Detailed {
            let _ = writeln!(out, "Job Id: {}", job_id);
            if matches.is_empty() {
                out.push_str(NO_SUSPECT);
                return Self(out);
            }
        }

        out.push_str(SUSPECT_HEADER);
        out.push('\n');
        for (subject, similarity) in matches.iter() {
            let _ = writeln!(out, "name: {} - similarity: {:.2}", subject, similarity);
        }

        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchRecord;

    fn map(entries: &[(&str, f64)]) -> BestMatchMap {
        entries
            .iter()
            .map(|(id, score)| MatchRecord::new(*id, *score))
            .collect()
    }

    #[test]
    fn test_detailed_with_matches() {
        let report = Report::render(&JobId::from("job-1"), &map(&[("A", 95.1)]), ReportStyle::Detailed);
        let text = report.as_str();

        assert!(text.starts_with("Job Id: job-1\n"));
        assert!(text.contains(SUSPECT_HEADER));
        assert!(text.contains("name: A - similarity: 95.10"));
        assert!(text.contains("95.1"));
    }

    #[test]
    fn test_detailed_empty() {
        let report = Report::render(&JobId::from("job-1"), &BestMatchMap::new(), ReportStyle::Detailed);
        assert_eq!(
            report.as_str(),
            "Job Id: job-1\nThere is no criminal suspect in this video"
        );
    }

    #[test]
    fn test_compact_empty_keeps_header() {
        let report = Report::render(&JobId::from("job-1"), &BestMatchMap::new(), ReportStyle::Compact);
        assert_eq!(report.as_str(), "Detected criminal suspect:\n");
    }

    #[test]
    fn test_one_line_per_subject() {
        let report = Report::render(
            &JobId::from("job-2"),
            &map(&[("john-doe", 88.0), ("jane-roe", 70.25), ("john-doe", 91.5)]),
            ReportStyle::Compact,
        );
        let lines: Vec<&str> = report.as_str().lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"name: john-doe - similarity: 91.50"));
        assert!(lines.contains(&"name: jane-roe - similarity: 70.25"));
        assert!(!report.as_str().contains("Job Id"));
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("Compact".parse::<ReportStyle>().unwrap(), ReportStyle::Compact);
        assert_eq!("detailed".parse::<ReportStyle>().unwrap(), ReportStyle::Detailed);
        assert!("fancy".parse::<ReportStyle>().is_err());
    }
}
