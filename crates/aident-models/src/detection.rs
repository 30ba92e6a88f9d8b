//! Face search results and best-match aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::JobStatus;

/// A single face occurrence matched against a collection subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// External image id of the matched collection face
    pub subject_id: String,
    /// Similarity score in [0, 100]
    pub similarity: f64,
}

impl MatchRecord {
    pub fn new(subject_id: impl Into<String>, similarity: f64) -> Self {
        Self {
            subject_id: subject_id.into(),
            similarity,
        }
    }
}

/// Matches for one person tracked in the video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionGroup {
    pub matches: Vec<MatchRecord>,
}

impl DetectionGroup {
    pub fn new(matches: Vec<MatchRecord>) -> Self {
        Self { matches }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Full result set of a face search job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceSearchResults {
    /// Job status reported by `GetFaceSearch`
    pub status: Option<JobStatus>,
    /// Detection groups across all result pages
    pub groups: Vec<DetectionGroup>,
}

impl FaceSearchResults {
    /// Total number of matches across groups.
    pub fn match_count(&self) -> usize {
        self.groups.iter().map(|g| g.matches.len()).sum()
    }
}

/// Highest similarity observed per subject.
///
/// Keys are kept ordered so reports render deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestMatchMap {
    scores: BTreeMap<String, f64>,
}

impl BestMatchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce detection groups to the best score per subject.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a DetectionGroup>) -> Self {
        let mut map = Self::new();
        for group in groups {
            for record in &group.matches {
                map.record(&record.subject_id, record.similarity);
            }
        }
        map
    }

    /// Keep `similarity` if it beats the stored score for `subject_id`.
    ///
    /// Non-finite scores are ignored.
    pub fn record(&mut self, subject_id: &str, similarity: f64) {
        if !similarity.is_finite() {
            return;
        }
        let entry = self.scores.entry(subject_id.to_string()).or_insert(0.0);
        *entry = entry.max(similarity);
    }

    pub fn get(&self, subject_id: &str) -> Option<f64> {
        self.scores.get(subject_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Entries in subject id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<MatchRecord> for BestMatchMap {
    fn from_iter<I: IntoIterator<Item = MatchRecord>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.record(&record.subject_id, record.similarity);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(matches: &[(&str, f64)]) -> DetectionGroup {
        DetectionGroup::new(
            matches
                .iter()
                .map(|(id, score)| MatchRecord::new(*id, *score))
                .collect(),
        )
    }

    #[test]
    fn test_keeps_maximum_per_subject() {
        let groups = vec![group(&[("A", 72.3)]), group(&[("A", 95.1), ("B", 40.0)])];
        let map = BestMatchMap::from_groups(&groups);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("A"), Some(95.1));
        assert_eq!(map.get("B"), Some(40.0));
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = vec![group(&[("A", 72.3), ("A", 95.1), ("B", 12.0)])];
        let backward = vec![group(&[("B", 12.0), ("A", 95.1), ("A", 72.3)])];

        assert_eq!(
            BestMatchMap::from_groups(&forward),
            BestMatchMap::from_groups(&backward)
        );
    }

    #[test]
    fn test_empty_without_matches() {
        assert!(BestMatchMap::from_groups(&Vec::<DetectionGroup>::new()).is_empty());
        assert!(BestMatchMap::from_groups(&[group(&[]), group(&[])]).is_empty());
        assert!(!BestMatchMap::from_groups(&[group(&[]), group(&[("A", 0.0)])]).is_empty());
    }

    #[test]
    fn test_non_finite_scores_skipped() {
        let map: BestMatchMap = vec![
            MatchRecord::new("A", f64::NAN),
            MatchRecord::new("B", 50.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.get("A"), None);
        assert_eq!(map.get("B"), Some(50.0));
    }

    #[test]
    fn test_iter_sorted_by_subject() {
        let map: BestMatchMap = vec![MatchRecord::new("zed", 1.0), MatchRecord::new("amy", 2.0)]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["amy", "zed"]);
    }

    #[test]
    fn test_match_count() {
        let results = FaceSearchResults {
            status: Some(JobStatus::Succeeded),
            groups: vec![group(&[("A", 1.0), ("B", 2.0)]), group(&[("A", 3.0)])],
        };
        assert_eq!(results.match_count(), 3);
    }
}
