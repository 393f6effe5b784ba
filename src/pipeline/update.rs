// src/pipeline/update.rs

//! Merge a year's fresh episodes into its archive.

use crate::error::Result;
use crate::models::{Config, Feed};
use crate::services::{DateNormalizer, MergeOutcome, merge_episodes};
use crate::storage::EpisodeStorage;
use crate::utils::console;

use super::fetch::{FetchOutcome, process_feed, run_fetch};

/// Fetch `year` from the feed and merge the result into its archive.
pub async fn run_update(
    config: &Config,
    storage: &dyn EpisodeStorage,
    year: i32,
) -> Result<MergeOutcome> {
    let outcome = run_fetch(config, storage, year).await?;
    merge_into_archive(config, storage, year, outcome).await
}

/// Like [`run_update`] for an already parsed feed.
pub async fn update_from_feed(
    config: &Config,
    storage: &dyn EpisodeStorage,
    feed: &Feed,
    year: i32,
) -> Result<MergeOutcome> {
    let outcome = process_feed(config, storage, feed, year).await?;
    merge_into_archive(config, storage, year, outcome).await
}

async fn merge_into_archive(
    config: &Config,
    storage: &dyn EpisodeStorage,
    year: i32,
    outcome: FetchOutcome,
) -> Result<MergeOutcome> {
    if outcome.episodes.is_empty() {
        return Ok(MergeOutcome::default());
    }

    let existing = storage.load_archive(year).await?;
    let normalizer = DateNormalizer::from_config(&config.dates);
    let merged = merge_episodes(existing, &outcome.episodes, &normalizer);

    let location = storage.save_archive(year, &merged.episodes).await?;
    console::success(&format!(
        "Added {} new episodes to {}",
        merged.added, location
    ));

    Ok(merged)
}
