//! Year-based episode selection.
//!
//! Selection trusts the feed's declared `pubDate` format; the looser
//! multi-format parsing only happens later, for display.

use chrono::Datelike;

use crate::error::{AppError, Result};
use crate::models::{FeedEntry, RawEpisode};
use crate::services::SummaryCleaner;
use crate::services::dates::parse_date;

/// Episodes picked for one year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Matching episodes in feed order
    pub episodes: Vec<RawEpisode>,

    /// Entries dropped because their date did not parse
    pub skipped: usize,
}

/// Filters feed entries by publication year.
pub struct EpisodeSelector<'a> {
    feed_format: &'a str,
    cleaner: &'a SummaryCleaner,
}

impl<'a> EpisodeSelector<'a> {
    pub fn new(feed_format: &'a str, cleaner: &'a SummaryCleaner) -> Self {
        Self {
            feed_format,
            cleaner,
        }
    }

    /// Keep entries published in `year`, cleaning each summary on the way.
    ///
    /// Entries whose date does not parse are skipped with a warning.
    pub fn select(&self, entries: &[FeedEntry], year: i32) -> Selection {
        let mut selection = Selection::default();

        for entry in entries {
            let published = match parse_date(&entry.published, self.feed_format) {
                Some(date) => date,
                None => {
                    log::warn!(
                        "Skipping '{}': unparseable publish date '{}'",
                        entry.title,
                        entry.published
                    );
                    selection.skipped += 1;
                    continue;
                }
            };

            if published.year() == year {
                selection.episodes.push(RawEpisode {
                    title: entry.title.clone(),
                    published: entry.published.clone(),
                    duration: entry.duration.clone(),
                    summary: self.cleaner.clean(&entry.summary),
                });
            }
        }

        log::debug!(
            "Selected {} of {} entries for {} ({} skipped)",
            selection.episodes.len(),
            entries.len(),
            year,
            selection.skipped
        );

        selection
    }
}

/// Parse the year argument.
pub fn parse_year(input: &str) -> Result<i32> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_year(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CleaningConfig, DateConfig};

    fn entry(title: &str, published: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            published: published.to_string(),
            duration: "00:30:00".to_string(),
            summary: "<p>Summary&nbsp;text</p>".to_string(),
        }
    }

    fn select(entries: &[FeedEntry], year: i32) -> Selection {
        let cleaner = SummaryCleaner::new(&CleaningConfig::default()).unwrap();
        let dates = DateConfig::default();
        EpisodeSelector::new(&dates.feed_format, &cleaner).select(entries, year)
    }

    #[test]
    fn test_filters_by_year() {
        let entries = vec![
            entry("New", "Mon, 25 Jan 2021 22:18:09 GMT"),
            entry("Old", "Wed, 23 Dec 2020 10:00:00 GMT"),
        ];

        let selection = select(&entries, 2020);
        assert_eq!(selection.episodes.len(), 1);
        assert_eq!(selection.episodes[0].title, "Old");
        assert_eq!(selection.skipped, 0);
    }

    #[test]
    fn test_keeps_feed_order_and_cleans() {
        let entries = vec![
            entry("Third", "Fri, 29 Jan 2021 22:18:09 GMT"),
            entry("Second", "Wed, 27 Jan 2021 22:18:09 GMT"),
            entry("First", "Mon, 25 Jan 2021 22:18:09 GMT"),
        ];

        let selection = select(&entries, 2021);
        let titles: Vec<_> = selection.episodes.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
        assert_eq!(selection.episodes[0].summary, "Summarytext");
        assert_eq!(selection.episodes[0].published, "Fri, 29 Jan 2021 22:18:09 GMT");
    }

    #[test]
    fn test_unparseable_date_is_skipped() {
        let entries = vec![
            entry("Broken", "2021-01-25T22:18:09Z"),
            entry("Fine", "Mon, 25 Jan 2021 22:18:09 GMT"),
        ];

        let selection = select(&entries, 2021);
        assert_eq!(selection.episodes.len(), 1);
        assert_eq!(selection.episodes[0].title, "Fine");
        assert_eq!(selection.skipped, 1);
    }

    #[test]
    fn test_wrong_weekday_still_selected() {
        let entries = vec![entry("Off by one", "Tue, 25 Jan 2021 22:18:09 GMT")];

        let selection = select(&entries, 2021);
        assert_eq!(selection.episodes.len(), 1);
        assert_eq!(selection.skipped, 0);
    }

    #[test]
    fn test_no_match_is_empty() {
        let entries = vec![entry("New", "Mon, 25 Jan 2021 22:18:09 GMT")];
        assert!(select(&entries, 1999).episodes.is_empty());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2021").unwrap(), 2021);
        assert_eq!(parse_year(" 2019 ").unwrap(), 2019);
        assert!(matches!(
            parse_year("twenty"),
            Err(AppError::InvalidYear { .. })
        ));
    }
}
