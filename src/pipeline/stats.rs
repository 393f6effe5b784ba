// src/pipeline/stats.rs

use crate::error::Result;
use crate::models::ArchiveStats;
use crate::services::compute_stats;
use crate::storage::EpisodeStorage;
use crate::utils::console;

/// Summarize every yearly archive.
pub async fn run_stats(storage: &dyn EpisodeStorage) -> Result<ArchiveStats> {
    let archives = storage.load_all_archives().await?;
    let stats = compute_stats(&archives);

    console::header("Podcast Statistics");
    console::summary(
        "Archive",
        &[
            ("Total episodes", stats.total_episodes.to_string()),
            ("Total duration", stats.total_duration.clone()),
            (
                "Average episodes/month",
                stats.average_episodes_per_month.to_string(),
            ),
        ],
    );
    for year in &stats.years_available {
        let count = stats.episodes_per_year.get(year).copied().unwrap_or(0);
        console::sub_item(&format!("{}: {} episodes", year, count));
    }

    Ok(stats)
}
