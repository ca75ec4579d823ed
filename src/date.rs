//! Date handling for overview records, DATE, NEWNEWS and NEWGROUPS
//!
//! News servers emit a zoo of RFC 822 descendants in the overview `Date`
//! column. [`parse_news_date`] accepts the common ones and returns `None`
//! for anything else; callers treat an unparsable date as absent rather
//! than as an error.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::{NntpError, Result};

/// Formats tried after RFC 2822 parsing fails, applied to a normalized
/// string with the weekday and trailing comment removed and a numeric zone.
///
/// Two-digit years come first: `%y` consumes at most two digits, so a
/// four-digit year falls through to the `%Y` variants.
const FALLBACK_FORMATS: &[&str] = &[
    "%d %b %y %H:%M:%S %z",
    "%d %b %y %H:%M %z",
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
];

/// Named zones seen in the wild, mapped to numeric offsets
const NAMED_ZONES: &[(&str, &str)] = &[
    ("GMT", "+0000"),
    ("UT", "+0000"),
    ("UTC", "+0000"),
    ("Z", "+0000"),
    ("EST", "-0500"),
    ("EDT", "-0400"),
    ("CST", "-0600"),
    ("CDT", "-0500"),
    ("MST", "-0700"),
    ("MDT", "-0600"),
    ("PST", "-0800"),
    ("PDT", "-0700"),
    ("BST", "+0100"),
    ("CET", "+0100"),
    ("CEST", "+0200"),
    ("MET", "+0100"),
    ("MEST", "+0200"),
];

/// Parse a news-style date, preserving the original offset
///
/// Accepted shapes include:
/// - `Sat, 18 Oct 2003 18:00:00 +0030`
/// - `18 Oct 2003 19:00:00 +0030`
/// - `Mon, 8 Jun 2009 06:27:41 -0700 (PDT)`
/// - `Tue, 20 Jan 26 12:00 GMT`
///
/// Returns `None` when no known format matches.
///
/// # Example
///
/// ```
/// use nntp_stream::parse_news_date;
///
/// let date = parse_news_date("Mon, 8 Jun 2009 06:27:41 -0700 (PDT)").unwrap();
/// assert_eq!(date.offset().local_minus_utc(), -7 * 3600);
/// assert!(parse_news_date("yesterday-ish").is_none());
/// ```
pub fn parse_news_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(date);
    }

    let normalized = normalize(trimmed);
    FALLBACK_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
}

/// Strip the trailing comment and leading weekday, and turn a named zone
/// into a numeric offset
fn normalize(raw: &str) -> String {
    let mut text = raw;

    if let Some(idx) = text.find('(') {
        text = text[..idx].trim_end();
    }

    if let Some((head, rest)) = text.split_once(',')
        && head.trim().chars().all(|c| c.is_ascii_alphabetic())
    {
        text = rest.trim_start();
    }

    let Some((body, zone)) = text.rsplit_once(' ') else {
        return text.to_string();
    };

    let zone = NAMED_ZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map_or(zone, |(_, offset)| offset);

    format!("{} {}", body.trim_end(), zone)
}

/// Parse the `yyyymmddhhmmss` payload of a 111 DATE response
pub fn parse_server_date(text: &str) -> Result<DateTime<Utc>> {
    let stamp = text.split_whitespace().next().unwrap_or_default();
    NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| NntpError::InvalidResponse(format!("Invalid DATE response: {}", text)))
}

/// Format a timestamp as the `yyyymmdd hhmmss GMT` argument of NEWNEWS and NEWGROUPS
pub fn format_command_date(since: DateTime<Utc>) -> String {
    since.format("%Y%m%d %H%M%S GMT").to_string()
}
