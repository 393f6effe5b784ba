//! Archive statistics.

use std::collections::BTreeMap;

use serde::Serialize;

/// Aggregate numbers over every yearly archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArchiveStats {
    pub total_episodes: usize,

    /// Rendered as `"<h>h <m>min"`
    pub total_duration: String,

    /// Rounded to one decimal place
    pub average_episodes_per_month: f64,

    pub episodes_per_year: BTreeMap<String, usize>,

    /// Sorted ascending
    pub years_available: Vec<String>,
}
