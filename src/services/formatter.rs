//! Episode formatting.
//!
//! Turns selected episodes into the records written to disk: display date,
//! caller list and residual summary.

use crate::error::Result;
use crate::models::{Config, RawEpisode, StructuredEpisode};
use crate::services::dates::format_date;
use crate::services::{CallerSegmenter, DateNormalizer};

/// Builds [`StructuredEpisode`]s from [`RawEpisode`]s.
#[derive(Debug, Clone)]
pub struct EpisodeFormatter {
    normalizer: DateNormalizer,
    segmenter: CallerSegmenter,
    display_format: String,
    line_break: String,
}

impl EpisodeFormatter {
    pub fn new(
        normalizer: DateNormalizer,
        segmenter: CallerSegmenter,
        display_format: impl Into<String>,
        line_break: impl Into<String>,
    ) -> Self {
        Self {
            normalizer,
            segmenter,
            display_format: display_format.into(),
            line_break: line_break.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            DateNormalizer::from_config(&config.dates),
            CallerSegmenter::from_config(&config.segmenting)?,
            config.dates.display_format.clone(),
            config.output.line_break.clone(),
        ))
    }

    /// Format one episode.
    pub fn format(&self, raw: &RawEpisode) -> StructuredEpisode {
        let segmented = self.segmenter.segment(&raw.summary);
        let summary = segmented.residual.replace('\n', &self.line_break);

        StructuredEpisode {
            episode_title: raw.title.trim().to_string(),
            date: self.display_date(&raw.published),
            duration: raw.duration.trim().to_string(),
            callers: segmented.callers,
            summary: summary.trim().to_string(),
        }
    }

    /// Format a selection, returning records oldest first.
    ///
    /// Feeds list newest first, so the output is the selection reversed.
    pub fn format_all(&self, episodes: &[RawEpisode]) -> Vec<StructuredEpisode> {
        episodes.iter().rev().map(|raw| self.format(raw)).collect()
    }

    /// Normalized display date, or the raw string when it cannot be produced.
    fn display_date(&self, published: &str) -> String {
        let raw = published.trim();
        let Some(date) = self.normalizer.normalize(raw) else {
            return raw.to_string();
        };

        match format_date(date, &self.display_format) {
            Some(formatted) => formatted.trim().to_string(),
            None => {
                log::warn!(
                    "Failed to format date: {} (display format '{}')",
                    raw,
                    self.display_format
                );
                raw.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SummaryCleaner;

    fn formatter() -> EpisodeFormatter {
        EpisodeFormatter::from_config(&Config::default()).unwrap()
    }

    fn raw(title: &str, published: &str, summary: &str) -> RawEpisode {
        RawEpisode {
            title: title.to_string(),
            published: published.to_string(),
            duration: " 01:02:03 ".to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_formats_date_and_splits_callers() {
        let episode = formatter().format(&raw(
            " Episode 1 ",
            "Mon, 25 Jan 2021 22:18:09 GMT",
            "Intro. Caller #1 hello.",
        ));

        assert_eq!(episode.episode_title, "Episode 1");
        assert_eq!(episode.date, "January 25, 2021");
        assert_eq!(episode.duration, "01:02:03");
        assert_eq!(episode.callers, vec!["Caller #1 hello."]);
        assert_eq!(episode.summary, "Intro.");
    }

    #[test]
    fn test_unparseable_date_kept_verbatim() {
        let episode = formatter().format(&raw("E", " sometime in spring ", "x"));
        assert_eq!(episode.date, "sometime in spring");
    }

    #[test]
    fn test_bad_display_format_falls_back_to_raw() {
        let mut config = Config::default();
        config.dates.display_format = "%Q".to_string();
        let formatter = EpisodeFormatter::from_config(&config).unwrap();

        let episode = formatter.format(&raw("E", "June 10, 2019", "x"));
        assert_eq!(episode.date, "June 10, 2019");
    }

    #[test]
    fn test_format_all_reverses_selection() {
        let episodes = vec![
            raw("Newest", "Fri, 29 Jan 2021 22:18:09 GMT", "c"),
            raw("Middle", "Wed, 27 Jan 2021 22:18:09 GMT", "b"),
            raw("Oldest", "Mon, 25 Jan 2021 22:18:09 GMT", "a"),
        ];

        let formatted = formatter().format_all(&episodes);
        let titles: Vec<_> = formatted.iter().map(|e| e.episode_title.as_str()).collect();
        assert_eq!(titles, vec!["Oldest", "Middle", "Newest"]);
    }

    #[test]
    fn test_end_to_end_clean_then_segment() {
        let cleaner = SummaryCleaner::new(&Config::default().cleaning).unwrap();
        let summary = cleaner.clean(
            "Intro text. Caller #1 talks about cats. Caller #2 talks about dogs. Powered by Acme Hosting",
        );

        let episode = formatter().format(&raw("E", "June 10, 2019", &summary));
        assert_eq!(episode.summary, "Intro text.");
        assert_eq!(
            episode.callers,
            vec!["Caller #1 talks about cats.", "Caller #2 talks about dogs."]
        );
        assert_eq!(episode.date, "June 10, 2019");
    }
}
