//! Multi-format date normalization.
//!
//! Feed dates drift between formats over the years. The normalizer tries each
//! configured format in order and keeps the first that parses.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::DateConfig;

/// Parses raw date strings against an ordered list of formats.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    formats: Vec<String>,
}

impl DateNormalizer {
    /// Create a normalizer trying `formats` in the given order.
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn from_config(config: &DateConfig) -> Self {
        Self::new(config.formats.clone())
    }

    /// Return the date of the first format that parses `raw`.
    ///
    /// Time and zone fields in a format are consumed but only the calendar
    /// date is kept. On exhaustion a warning is logged and `None` returned.
    pub fn normalize(&self, raw: &str) -> Option<NaiveDate> {
        let parsed = self.try_formats(raw);
        if parsed.is_none() {
            log::warn!("Could not parse date: {}", raw);
        }
        parsed
    }

    /// Like [`normalize`](Self::normalize) but without the warning.
    pub fn try_formats(&self, raw: &str) -> Option<NaiveDate> {
        self.formats
            .iter()
            .find_map(|fmt| parse_date(raw, fmt))
    }
}

/// Parse the calendar date out of `raw` using a single format.
///
/// A leading `%a, ` weekday is matched by shape only. Feeds occasionally
/// carry a weekday that disagrees with the date, and the date wins.
pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    if let Some(format_rest) = format.strip_prefix("%a, ") {
        if let Some((weekday, raw_rest)) = raw.split_once(", ") {
            if !weekday.is_empty() && weekday.chars().all(|c| c.is_ascii_alphabetic()) {
                return NaiveDate::parse_from_str(raw_rest, format_rest).ok();
            }
        }
    }

    NaiveDate::parse_from_str(raw, format).ok()
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::from_config(&DateConfig::default())
    }
}

/// Render `date` with a strftime-style format.
///
/// Returns `None` instead of panicking when the format string is invalid.
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(date: NaiveDate) -> (i32, u32, u32) {
        (date.year(), date.month(), date.day())
    }

    #[test]
    fn test_long_month_name() {
        let date = DateNormalizer::default().normalize("June 10, 2019").unwrap();
        assert_eq!(ymd(date), (2019, 6, 10));
    }

    #[test]
    fn test_rfc822_with_zone_name() {
        let date = DateNormalizer::default()
            .normalize("Mon, 25 Jan 2021 22:18:09 GMT")
            .unwrap();
        assert_eq!(ymd(date), (2021, 1, 25));
    }

    #[test]
    fn test_mismatched_weekday_ignored() {
        let date = DateNormalizer::default()
            .normalize("Tue, 25 Jan 2021 22:18:09 GMT")
            .unwrap();
        assert_eq!(ymd(date), (2021, 1, 25));
    }

    #[test]
    fn test_parse_date_weekday_shape_still_checked() {
        let fmt = "%a, %d %b %Y %H:%M:%S %Z";
        assert!(parse_date("Mon, 25 Jan 2021 22:18:09 GMT", fmt).is_some());
        assert!(parse_date("25 Jan 2021 22:18:09 GMT", fmt).is_none());
        assert!(parse_date("M0n, 25 Jan 2021 22:18:09 GMT", fmt).is_none());
    }

    #[test]
    fn test_iso_utc() {
        let date = DateNormalizer::default()
            .normalize("2021-01-25T22:18:09Z")
            .unwrap();
        assert_eq!(ymd(date), (2021, 1, 25));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert!(DateNormalizer::default().normalize("not a date").is_none());
        assert!(DateNormalizer::default().normalize("").is_none());
    }

    #[test]
    fn test_earlier_format_wins() {
        let normalizer = DateNormalizer::new(vec!["%d/%m/%Y".into(), "%m/%d/%Y".into()]);
        let date = normalizer.normalize("03/04/2021").unwrap();
        assert_eq!(ymd(date), (2021, 4, 3));

        let swapped = DateNormalizer::new(vec!["%m/%d/%Y".into(), "%d/%m/%Y".into()]);
        let date = swapped.normalize("03/04/2021").unwrap();
        assert_eq!(ymd(date), (2021, 3, 4));
    }

    #[test]
    fn test_falls_through_to_later_format() {
        let normalizer = DateNormalizer::new(vec!["%Y-%m-%d".into(), "%B %d, %Y".into()]);
        let date = normalizer.normalize("March 3, 2020").unwrap();
        assert_eq!(ymd(date), (2020, 3, 3));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        assert_eq!(format_date(date, "%B %d, %Y").as_deref(), Some("January 05, 2021"));
    }

    #[test]
    fn test_format_date_invalid_format() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        assert!(format_date(date, "%Q").is_none());
    }
}
