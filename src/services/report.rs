//! Plain-text rendering of a year's episodes.

use crate::models::RawEpisode;

/// Width of the header and separator rules
const RULE_WIDTH: usize = 50;

/// Render the text report, oldest episode first.
///
/// `episodes` is in feed order (newest first) and is reversed here.
pub fn render_text_report(year: i32, episodes: &[RawEpisode]) -> String {
    let mut out = format!("GTWM Episodes - {}\n{}\n\n", year, "=".repeat(RULE_WIDTH));

    for episode in episodes.iter().rev() {
        out.push_str(&episode.text_block());
        out.push('\n');
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push_str("\n\n");
    }

    out
}
