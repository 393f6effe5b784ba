//! Storage abstractions for episode output.
//!
//! Two kinds of files are written:
//! - Per-run files: `{output}/{prefix}_{year}.json` and `.txt`
//! - Yearly archives: `{archive}/{year}.json`, merged across runs
//!
//! ## Directory Structure
//!
//! ```text
//! output/
//! ├── gtwm_episodes_2021.json   # Structured episodes, oldest first
//! └── gtwm_episodes_2021.txt    # Plain-text report
//! data/episodes/
//! ├── 2020.json                 # Merged archive
//! └── 2021.json
//! ```

pub mod local;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::StructuredEpisode;

// Re-export for convenience
pub use local::LocalStorage;

/// Locations of the files written by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    pub json: String,
    pub text: String,
}

/// Trait for episode storage backends.
#[async_trait]
pub trait EpisodeStorage: Send + Sync {
    /// Write the structured episodes and the text report for a run.
    ///
    /// Both files are fully written to temp files before either is renamed
    /// into place.
    async fn write_run(
        &self,
        year: i32,
        episodes: &[StructuredEpisode],
        report: &str,
    ) -> Result<RunFiles>;

    /// Load a yearly archive; empty when none exists yet.
    async fn load_archive(&self, year: i32) -> Result<Vec<StructuredEpisode>>;

    /// Replace a yearly archive. Returns the file location.
    async fn save_archive(&self, year: i32, episodes: &[StructuredEpisode]) -> Result<String>;

    /// Load every yearly archive, keyed by file stem.
    async fn load_all_archives(&self) -> Result<BTreeMap<String, Vec<StructuredEpisode>>>;
}
