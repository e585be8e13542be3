// src/analytics/mod.rs
//! Measurement of a standup digest for the completion report.

use crate::model::StandupEntry;
use std::collections::BTreeMap;

/// Quick statistics for user-facing progress messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub pages: usize,
    pub work_items: usize,
    /// Pages per project name, sorted by name.
    pub projects: BTreeMap<String, usize>,
    /// Pages that produced no work items at all.
    pub empty_pages: usize,
}

impl DigestSummary {
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

/// Measures a set of standup entries.
pub fn measure_digest(entries: &[StandupEntry]) -> DigestSummary {
    entries
        .iter()
        .fold(DigestSummary::default(), |mut summary, entry| {
            summary.pages += 1;
            summary.work_items += entry.contents.len();
            if entry.contents.is_empty() {
                summary.empty_pages += 1;
            }
            *summary
                .projects
                .entry(entry.project_name.clone())
                .or_default() += 1;
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(project: &str, items: usize) -> StandupEntry {
        StandupEntry {
            id: String::new(),
            title: String::new(),
            project_name: project.to_string(),
            contents: (0..items).map(|i| format!("item {}", i)).collect(),
        }
    }

    #[test]
    fn test_measure_digest() {
        let summary = measure_digest(&[entry("A", 2), entry("B", 0), entry("A", 1)]);
        assert_eq!(summary.pages, 3);
        assert_eq!(summary.work_items, 3);
        assert_eq!(summary.empty_pages, 1);
        assert_eq!(summary.project_count(), 2);
        assert_eq!(summary.projects["A"], 2);
    }

    #[test]
    fn test_empty_digest() {
        assert_eq!(measure_digest(&[]), DigestSummary::default());
    }
}
