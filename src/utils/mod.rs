//! Utility functions and helpers.

pub mod console;
pub mod http;

/// Collapse runs of whitespace to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
