//! Merging fresh episodes into a yearly archive.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::StructuredEpisode;
use crate::services::DateNormalizer;

static ORDINAL_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)?,").ok());

/// Result of a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Archive contents, oldest first
    pub episodes: Vec<StructuredEpisode>,

    /// How many incoming episodes were new
    pub added: usize,
}

/// Merge `incoming` into `existing`, skipping episodes already archived
/// under the same title and date, then sort oldest first.
pub fn merge_episodes(
    existing: Vec<StructuredEpisode>,
    incoming: &[StructuredEpisode],
    normalizer: &DateNormalizer,
) -> MergeOutcome {
    let known: HashSet<(String, String)> = existing
        .iter()
        .map(|e| (e.episode_title.clone(), e.date.clone()))
        .collect();

    let mut episodes = existing;
    let mut added = 0;
    for episode in incoming {
        let (title, date) = episode.merge_key();
        if !known.contains(&(title.to_string(), date.to_string())) {
            episodes.push(episode.clone());
            added += 1;
        }
    }

    // Undated records sort last; stable sort keeps their relative order.
    episodes.sort_by_key(|e| {
        let date = archive_date(&e.date, normalizer);
        (date.is_none(), date)
    });

    MergeOutcome { episodes, added }
}

/// Parse an archive display date, tolerating ordinals like `June 1st, 2019`.
pub fn archive_date(date: &str, normalizer: &DateNormalizer) -> Option<NaiveDate> {
    let cleaned = match ORDINAL_SUFFIX.as_ref() {
        Some(re) => re.replace(date.trim(), "$1,").into_owned(),
        None => date.trim().to_string(),
    };
    normalizer.try_formats(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, date: &str) -> StructuredEpisode {
        StructuredEpisode {
            episode_title: title.into(),
            date: date.into(),
            duration: "10:00".into(),
            callers: vec![],
            summary: String::new(),
        }
    }

    fn titles(episodes: &[StructuredEpisode]) -> Vec<&str> {
        episodes.iter().map(|e| e.episode_title.as_str()).collect()
    }

    #[test]
    fn test_merge_skips_duplicates_and_sorts() {
        let existing = vec![
            episode("B", "March 02, 2021"),
            episode("A", "January 05, 2021"),
        ];
        let incoming = vec![
            episode("A", "January 05, 2021"),
            episode("C", "February 10, 2021"),
        ];

        let outcome = merge_episodes(existing, &incoming, &DateNormalizer::default());
        assert_eq!(outcome.added, 1);
        assert_eq!(titles(&outcome.episodes), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_same_title_different_date_is_new() {
        let existing = vec![episode("Rerun", "January 05, 2021")];
        let incoming = vec![episode("Rerun", "January 12, 2021")];

        let outcome = merge_episodes(existing, &incoming, &DateNormalizer::default());
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.episodes.len(), 2);
    }

    #[test]
    fn test_undated_sort_last() {
        let existing = vec![episode("Odd", "someday"), episode("Late", "May 01, 2021")];
        let incoming = vec![episode("Early", "April 01, 2021")];

        let outcome = merge_episodes(existing, &incoming, &DateNormalizer::default());
        assert_eq!(titles(&outcome.episodes), vec!["Early", "Late", "Odd"]);
    }

    #[test]
    fn test_archive_date_ordinals() {
        let normalizer = DateNormalizer::default();
        let date = archive_date("June 1st, 2019", &normalizer).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
        assert!(archive_date("June 22nd, 2019", &normalizer).is_some());
    }
}
