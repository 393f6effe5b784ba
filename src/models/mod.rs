// src/models/mod.rs

//! Domain models for the episode pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod episode;
mod feed;
mod stats;

// Re-export all public types
pub use config::{
    CleaningConfig, Config, DateConfig, FeedConfig, LoggingConfig, OutputConfig, RemovalRule,
    Replacement, RuleScope, SegmentingConfig,
};
pub use episode::{CallerRecord, RawEpisode, StructuredEpisode};
pub use feed::{Feed, FeedEntry};
pub use stats::ArchiveStats;
