//! Pipeline entry points for episode operations.
//!
//! - `run_fetch`: Select a year's episodes from the feed and write them out
//! - `run_update`: Fetch, then merge into the yearly archive
//! - `run_stats`: Summarize every yearly archive
//! - `run_validate`: Check the configuration

pub mod fetch;
pub mod stats;
pub mod update;
pub mod validate;

pub use fetch::{FetchOutcome, run_fetch};
pub use stats::run_stats;
pub use update::run_update;
pub use validate::run_validate;
