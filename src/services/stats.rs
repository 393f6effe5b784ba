//! Archive statistics.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ArchiveStats, StructuredEpisode};

static LEGACY_DURATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)h (\d+)min").ok());

/// Parse a duration string into whole minutes.
///
/// Accepts `H:MM:SS`, `MM:SS`, a bare number of seconds and the legacy
/// `"1h 5min"` form. Anything else counts as zero.
///
/// `MM:SS` is read as minutes and seconds, never hours and minutes, so
/// `"45:30"` is 45 minutes. Seconds are always dropped.
pub fn duration_minutes(duration: &str) -> u64 {
    let duration = duration.trim();

    let parts: Option<Vec<u64>> = duration.split(':').map(|p| p.parse().ok()).collect();
    match parts.as_deref() {
        Some([hours, minutes, _]) => return hours * 60 + minutes,
        Some([minutes, _]) => return *minutes,
        Some([seconds]) => return seconds / 60,
        _ => {}
    }

    LEGACY_DURATION
        .as_ref()
        .and_then(|re| re.captures(duration))
        .and_then(|caps| {
            let hours: u64 = caps.get(1)?.as_str().parse().ok()?;
            let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
            Some(hours * 60 + minutes)
        })
        .unwrap_or(0)
}

/// Render minutes as `"<h>h <m>min"`.
pub fn format_minutes(minutes: u64) -> String {
    format!("{}h {}min", minutes / 60, minutes % 60)
}

/// Compute statistics over archives keyed by year.
pub fn compute_stats(archives: &BTreeMap<String, Vec<StructuredEpisode>>) -> ArchiveStats {
    let total_episodes: usize = archives.values().map(Vec::len).sum();
    let total_minutes: u64 = archives
        .values()
        .flatten()
        .map(|episode| duration_minutes(&episode.duration))
        .sum();

    let episodes_per_year = archives
        .iter()
        .map(|(year, episodes)| (year.clone(), episodes.len()))
        .collect();

    let months = archives.len() * 12;
    let average_episodes_per_month = if months == 0 {
        0.0
    } else {
        (total_episodes as f64 / months as f64 * 10.0).round() / 10.0
    };

    ArchiveStats {
        total_episodes,
        total_duration: format_minutes(total_minutes),
        average_episodes_per_month,
        episodes_per_year,
        years_available: archives.keys().cloned().collect(),
    }
}
