//! Feed reading.
//!
//! Fetches the RSS document (over HTTP or from disk) and walks it with a
//! streaming XML reader, keeping only the fields the pipeline needs.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

use crate::error::{AppError, Result};
use crate::models::{Feed, FeedConfig, FeedEntry};
use crate::utils::http;

/// Loads and parses the configured feed.
pub struct FeedReader {
    config: FeedConfig,
    client: Option<reqwest::Client>,
}

impl FeedReader {
    /// Create a reader. An HTTP client is built only for remote feeds.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = if config.is_remote() {
            Some(http::create_async_client(config)?)
        } else {
            None
        };

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Fetch and parse the feed.
    pub async fn fetch(&self) -> Result<Feed> {
        let url = self.config.url.trim();
        let xml = match &self.client {
            Some(client) => {
                log::info!("Fetching feed from {}", url);
                http::fetch_text(client, url).await?
            }
            None => {
                log::info!("Reading feed from {}", url);
                tokio::fs::read_to_string(url).await?
            }
        };

        let feed = parse_feed(&xml)?;
        log::info!("Parsed {} entries from '{}'", feed.entries.len(), feed.title);
        Ok(feed)
    }
}

/// Fields collected while inside an `<item>`.
#[derive(Default)]
struct ItemFields {
    title: String,
    published: String,
    duration: String,
    description: Option<String>,
    itunes_summary: Option<String>,
    content: Option<String>,
}

impl ItemFields {
    fn set(&mut self, field: &str, value: String) {
        match field {
            "title" => self.title = value,
            "pubDate" => self.published = value,
            "itunes:duration" => self.duration = value,
            "description" => self.description = Some(value),
            "itunes:summary" => self.itunes_summary = Some(value),
            "content:encoded" => self.content = Some(value),
            _ => {}
        }
    }

    fn into_entry(self) -> FeedEntry {
        let summary = [self.description, self.itunes_summary, self.content]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default();

        FeedEntry {
            title: self.title,
            published: self.published,
            duration: self.duration,
            summary,
        }
    }
}

/// Parse an RSS 2.0 document.
pub fn parse_feed(xml: &str) -> Result<Feed> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();
    let mut saw_channel = false;
    let mut path: Vec<String> = Vec::new();
    let mut item: Option<ItemFields> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match name.as_str() {
                    "channel" => saw_channel = true,
                    "item" => item = Some(ItemFields::default()),
                    _ => {}
                }
                path.push(name);
                text.clear();
            }
            Event::Text(e) => text.push_str(&unescape_or_raw(&e)),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::End(_) => {
                let field = path.pop().unwrap_or_default();
                let parent = path.last().map(String::as_str);

                match (parent, field.as_str()) {
                    (Some("item"), _) => {
                        if let Some(fields) = item.as_mut() {
                            fields.set(&field, std::mem::take(&mut text));
                        }
                    }
                    (Some("channel"), "title") => feed.title = std::mem::take(&mut text),
                    (Some("channel"), "item") => {
                        if let Some(fields) = item.take() {
                            feed.entries.push(fields.into_entry());
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(AppError::feed("document has no <channel> element"));
    }

    Ok(feed)
}

/// Unescape XML text.
///
/// `&nbsp;` is passed through untouched so the summary cleaner sees it. Text
/// holding any other unknown entity is kept verbatim.
fn unescape_or_raw(e: &BytesText<'_>) -> String {
    let resolved = e.unescape_with(|entity| match entity {
        "nbsp" => Some("&nbsp;"),
        other => resolve_predefined_entity(other),
    });

    match resolved {
        Ok(text) => text.into_owned(),
        Err(err) => {
            log::debug!("Keeping text with unknown entity verbatim: {}", err);
            String::from_utf8_lossy(e).into_owned()
        }
    }
}
