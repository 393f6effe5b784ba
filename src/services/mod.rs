//! Service layer for the episode pipeline.
//!
//! This module contains the business logic for:
//! - Feed reading (`FeedReader`)
//! - Date normalization (`DateNormalizer`)
//! - Boilerplate removal (`SummaryCleaner`)
//! - Caller extraction (`CallerSegmenter`)
//! - Year selection (`EpisodeSelector`)
//! - Record building (`EpisodeFormatter`)
//! - Archive merging and statistics

pub mod archive;
mod callers;
mod cleaner;
pub mod dates;
mod feed;
mod formatter;
pub mod report;
mod selector;
pub mod stats;

pub use archive::{MergeOutcome, merge_episodes};
pub use callers::{CallerSegmenter, Segmented};
pub use cleaner::SummaryCleaner;
pub use dates::DateNormalizer;
pub use feed::{FeedReader, parse_feed};
pub use formatter::EpisodeFormatter;
pub use report::render_text_report;
pub use selector::{EpisodeSelector, Selection, parse_year};
pub use stats::compute_stats;
