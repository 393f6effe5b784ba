//! Application configuration structures.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where the feed comes from and how to fetch it
    #[serde(default)]
    pub feed: FeedConfig,

    /// Boilerplate removal rules
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Caller marker settings
    #[serde(default)]
    pub segmenting: SegmentingConfig,

    /// Date parsing and display formats
    #[serde(default)]
    pub dates: DateConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let url = self.feed.url.trim();
        if url.is_empty() {
            return Err(AppError::validation("feed.url is empty"));
        }
        if self.feed.is_remote() {
            Url::parse(url)?;
        }
        if self.feed.user_agent.trim().is_empty() {
            return Err(AppError::validation("feed.user_agent is empty"));
        }
        if self.feed.timeout_secs == 0 {
            return Err(AppError::validation("feed.timeout_secs must be > 0"));
        }
        if self.cleaning.rules.is_empty() {
            return Err(AppError::validation("No cleaning rules defined"));
        }
        for rule in &self.cleaning.rules {
            Regex::new(&rule.pattern)?;
        }
        Regex::new(&self.segmenting.caller_marker)?;
        if self.dates.formats.is_empty() {
            return Err(AppError::validation("No date formats defined"));
        }
        if self.output.file_prefix.trim().is_empty() {
            return Err(AppError::validation("output.file_prefix is empty"));
        }
        Ok(())
    }
}

/// Feed location and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// RSS feed URL, or a local file path
    #[serde(default = "defaults::feed_url")]
    pub url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates from the feed host
    #[serde(default = "defaults::skip_cert_verification")]
    pub skip_cert_verification: bool,
}

impl FeedConfig {
    /// Whether `url` should be fetched over HTTP rather than read from disk.
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim_start();
        url.starts_with("http://") || url.starts_with("https://")
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: defaults::feed_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            skip_cert_verification: defaults::skip_cert_verification(),
        }
    }
}

/// How far a removal rule reaches once its pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RuleScope {
    /// Remove only the matched text
    #[default]
    MatchOnly,
    /// Remove the match and everything after it
    ToEnd,
}

/// A single boilerplate removal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalRule {
    /// Regular expression, matched case-sensitively
    pub pattern: String,

    #[serde(default)]
    pub scope: RuleScope,
}

impl RemovalRule {
    pub fn match_only(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            scope: RuleScope::MatchOnly,
        }
    }

    pub fn to_end(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            scope: RuleScope::ToEnd,
        }
    }
}

/// Text cleaning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Removal rules, combined into one alternation
    #[serde(default = "defaults::removal_rules")]
    pub rules: Vec<RemovalRule>,

    /// Literal replacements applied after removal
    #[serde(default = "defaults::replacements")]
    pub replacements: Vec<Replacement>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            rules: defaults::removal_rules(),
            replacements: defaults::replacements(),
        }
    }
}

/// A text replacement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Caller segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentingConfig {
    /// Pattern that opens a caller sub-entry
    #[serde(default = "defaults::caller_marker")]
    pub caller_marker: String,
}

impl Default for SegmentingConfig {
    fn default() -> Self {
        Self {
            caller_marker: defaults::caller_marker(),
        }
    }
}

/// Date format settings (chrono `strftime` syntax).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// Formats tried in order when normalizing a date for display
    #[serde(default = "defaults::date_formats")]
    pub formats: Vec<String>,

    /// The feed's declared `pubDate` format, used for year selection
    #[serde(default = "defaults::feed_format")]
    pub feed_format: String,

    /// Format of the `date` field in the output
    #[serde(default = "defaults::display_format")]
    pub display_format: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            formats: defaults::date_formats(),
            feed_format: defaults::feed_format(),
            display_format: defaults::display_format(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for per-run JSON and text files
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Directory holding the merged `<year>.json` archives
    #[serde(default = "defaults::archive_dir")]
    pub archive_dir: String,

    /// File name prefix for per-run files
    #[serde(default = "defaults::file_prefix")]
    pub file_prefix: String,

    /// Replacement for newlines in summaries
    #[serde(default = "defaults::line_break")]
    pub line_break: String,

    /// Print the episode dump to stdout
    #[serde(default = "defaults::console_enabled")]
    pub console_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            archive_dir: defaults::archive_dir(),
            file_prefix: defaults::file_prefix(),
            line_break: defaults::line_break(),
            console_enabled: defaults::console_enabled(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::{RemovalRule, Replacement};

    // Feed defaults
    pub fn feed_url() -> String {
        "https://anchor.fm/s/4555b94c/podcast/rss".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; gtwm/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn skip_cert_verification() -> bool {
        true
    }

    // Cleaning defaults, tuned to the GTWM feed
    pub fn removal_rules() -> Vec<RemovalRule> {
        vec![
            RemovalRule::match_only(r"<.*?>"),
            RemovalRule::match_only(r"&nbsp;"),
            RemovalRule::to_end(r"Powered by"),
            RemovalRule::to_end(r"--- "),
            RemovalRule::to_end(r"BingoPlus!"),
            RemovalRule::to_end(r"GTWM has a new sponsor!"),
            RemovalRule::to_end(r"We will see you on another episode of GTWM tomorrow"),
            RemovalRule::to_end(r"\?*\s*Who doesn’t want to have fun and enjoy exciting games"),
        ]
    }
    pub fn replacements() -> Vec<Replacement> {
        vec![Replacement {
            from: "&quot;".into(),
            to: "\"".into(),
        }]
    }

    // Segmenting defaults
    pub fn caller_marker() -> String {
        r"Caller #\d+".into()
    }

    // Date defaults
    pub fn date_formats() -> Vec<String> {
        vec![
            "%B %d, %Y".into(),
            "%a, %d %b %Y %H:%M:%S %Z".into(),
            "%Y-%m-%dT%H:%M:%SZ".into(),
        ]
    }
    pub fn feed_format() -> String {
        "%a, %d %b %Y %H:%M:%S %Z".into()
    }
    pub fn display_format() -> String {
        "%B %d, %Y".into()
    }

    // Output defaults
    pub fn output_dir() -> String {
        "output".into()
    }
    pub fn archive_dir() -> String {
        "data/episodes".into()
    }
    pub fn file_prefix() -> String {
        "gtwm_episodes".into()
    }
    pub fn line_break() -> String {
        "<br>".into()
    }
    pub fn console_enabled() -> bool {
        true
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
