// src/pipeline/fetch.rs

//! Yearly episode extraction.

use crate::error::Result;
use crate::models::{Config, Feed, StructuredEpisode};
use crate::services::{
    EpisodeFormatter, EpisodeSelector, FeedReader, SummaryCleaner, render_text_report,
};
use crate::storage::EpisodeStorage;
use crate::utils::console;

/// Summary of a fetch run.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub feed_title: String,

    /// Structured episodes, oldest first
    pub episodes: Vec<StructuredEpisode>,

    /// Entries skipped for an unparseable publish date
    pub skipped: usize,

    pub json_location: Option<String>,
    pub text_location: Option<String>,
}

/// Fetch the configured feed and process `year`.
pub async fn run_fetch(
    config: &Config,
    storage: &dyn EpisodeStorage,
    year: i32,
) -> Result<FetchOutcome> {
    let reader = FeedReader::new(&config.feed)?;
    let feed = reader.fetch().await?;
    process_feed(config, storage, &feed, year).await
}

/// Select, format and write the episodes of `feed` published in `year`.
///
/// Nothing is written when no episode matches.
pub async fn process_feed(
    config: &Config,
    storage: &dyn EpisodeStorage,
    feed: &Feed,
    year: i32,
) -> Result<FetchOutcome> {
    let cleaner = SummaryCleaner::new(&config.cleaning)?;
    let formatter = EpisodeFormatter::from_config(config)?;

    console::line(&feed.title);
    console::blank();

    let selection = EpisodeSelector::new(&config.dates.feed_format, &cleaner)
        .select(&feed.entries, year);

    let mut outcome = FetchOutcome {
        feed_title: feed.title.clone(),
        skipped: selection.skipped,
        ..FetchOutcome::default()
    };

    if selection.skipped > 0 {
        log::warn!(
            "{} entries skipped for unparseable publish dates",
            selection.skipped
        );
    }

    if selection.episodes.is_empty() {
        console::line(&format!("No episodes found for year {}", year));
        return Ok(outcome);
    }

    console::line(&format!("Processing episodes for year: {}", year));
    for episode in selection.episodes.iter().rev() {
        console::line(&episode.text_block());
    }

    outcome.episodes = formatter.format_all(&selection.episodes);

    let report = render_text_report(year, &selection.episodes);
    let files = storage.write_run(year, &outcome.episodes, &report).await?;
    console::success(&format!("Episodes saved to {}", files.json));
    console::success(&format!("Episodes saved to {}", files.text));

    outcome.json_location = Some(files.json);
    outcome.text_location = Some(files.text);
    Ok(outcome)
}
