//! Episode records produced by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An episode selected for a year, before formatting.
///
/// `summary` has already been through the cleaner but still carries its
/// caller entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEpisode {
    pub title: String,
    pub published: String,
    pub duration: String,
    pub summary: String,
}

impl RawEpisode {
    /// Render the four-line block used by the console and text reports.
    pub fn text_block(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.title, self.published, self.duration, self.summary
        )
    }
}

/// A caller sub-entry: the marker followed by its free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerRecord(String);

impl CallerRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CallerRecord {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The final per-episode record written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredEpisode {
    /// Older archives used `title` or `episode` for this key
    #[serde(rename = "episode title", alias = "title", alias = "episode")]
    pub episode_title: String,

    /// Display date, or the raw feed date when it could not be parsed
    pub date: String,

    pub duration: String,

    #[serde(default)]
    pub callers: Vec<CallerRecord>,

    pub summary: String,
}

impl StructuredEpisode {
    /// Identity used when merging into an archive.
    pub fn merge_key(&self) -> (&str, &str) {
        (&self.episode_title, &self.date)
    }
}
