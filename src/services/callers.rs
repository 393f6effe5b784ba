//! Caller segmentation.
//!
//! Episode descriptions list listener calls inline, each opened by a marker
//! such as `Caller #3`. The segmenter pulls those out as separate records and
//! returns whatever is left as the general summary.

use regex::Regex;

use crate::error::Result;
use crate::models::{CallerRecord, SegmentingConfig};
use crate::utils::normalize_whitespace;

/// Callers found in a summary plus the residual text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    /// In document order
    pub callers: Vec<CallerRecord>,

    /// Non-caller text, whitespace-normalized
    pub residual: String,
}

/// Splits summaries on caller markers.
#[derive(Debug, Clone)]
pub struct CallerSegmenter {
    marker: Regex,
}

impl CallerSegmenter {
    /// Create a segmenter for the given marker pattern.
    pub fn new(marker: &str) -> Result<Self> {
        Ok(Self {
            marker: Regex::new(marker)?,
        })
    }

    pub fn from_config(config: &SegmentingConfig) -> Result<Self> {
        Self::new(&config.caller_marker)
    }

    /// Split `text` into caller records and residual summary.
    pub fn segment(&self, text: &str) -> Segmented {
        let parts = self.split_keeping_markers(text);
        let (head, rest) = match parts.split_first() {
            Some(split) => split,
            None => return Segmented::default(),
        };

        let mut callers = Vec::new();
        let mut residual: Vec<&str> = Vec::new();

        if !head.is_empty() && !self.starts_with_marker(head) {
            residual.push(head);
        }

        let mut pairs = rest.chunks_exact(2);
        for pair in &mut pairs {
            let record = format!("{}{}", pair[0], pair[1]);
            callers.push(CallerRecord::new(record.trim()));
        }

        if let [last] = pairs.remainder() {
            if self.starts_with_marker(last) {
                callers.push(CallerRecord::new(last.trim()));
            } else {
                residual.push(last);
            }
        }

        Segmented {
            callers,
            residual: normalize_whitespace(&residual.join(" ")),
        }
    }

    /// Split on marker matches, keeping each marker as its own part.
    ///
    /// The result alternates `[text, marker, text, marker, ..., text]`.
    fn split_keeping_markers<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut parts = Vec::new();
        let mut last = 0;
        for m in self.marker.find_iter(text) {
            parts.push(&text[last..m.start()]);
            parts.push(m.as_str());
            last = m.end();
        }
        parts.push(&text[last..]);
        parts
    }

    fn starts_with_marker(&self, text: &str) -> bool {
        self.marker.find(text).is_some_and(|m| m.start() == 0)
    }
}
