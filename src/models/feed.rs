//! Parsed feed structures.

/// A parsed syndication feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    /// Channel title
    pub title: String,

    /// Entries in document order (newest first for most feeds)
    pub entries: Vec<FeedEntry>,
}

/// One `<item>` of the feed. Never mutated after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,

    /// Raw `pubDate` text
    pub published: String,

    /// Raw `itunes:duration` text
    pub duration: String,

    /// Raw HTML description
    pub summary: String,
}
