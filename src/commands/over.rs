//! XZVER/OVER/XOVER commands and overview record parsing

use chrono::{DateTime, FixedOffset};

use crate::date::parse_news_date;
use crate::error::{NntpError, Result};

/// Build XZVER command (zlib-compressed overview, Astraweb/Giganews extension)
pub fn xzver(range: &str) -> String {
    format!("XZVER {}", range)
}

/// Build OVER command (RFC 3977 §8.3)
pub fn over(range: &str) -> String {
    format!("OVER {}", range)
}

/// Build XOVER command (RFC 2980 legacy name of OVER)
pub fn xover(range: &str) -> String {
    format!("XOVER {}", range)
}

/// One overview line: the per-article metadata summary
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverviewRecord {
    /// Article number within the group
    pub number: u64,
    /// Subject header, raw
    pub subject: String,
    /// From header, raw
    pub from: String,
    /// Date header; `None` when the server sent a date in no known format
    pub date: Option<DateTime<FixedOffset>>,
    /// Message-ID header
    pub message_id: String,
    /// References, oldest first
    pub references: Vec<String>,
    /// Article size in bytes (0 when absent)
    pub bytes: u64,
    /// Article size in lines (0 when absent)
    pub lines: u64,
    /// Fields beyond the eight standard columns, verbatim (e.g. `Xref: ...`)
    pub extra: Vec<String>,
}

/// Parse one tab-separated overview line
///
/// Format: `number\tsubject\tfrom\tdate\tmessage-id\treferences\tbytes\tlines[\textra...]`
///
/// Only the article number is mandatory. Missing trailing fields read as
/// empty or zero, unparsable counts read as zero and an unparsable date
/// reads as `None`. Some servers wrap long reference lists across extra tab
/// boundaries; fields after the references column that start with `<` are
/// folded back into the references when a byte count follows them.
///
/// # Errors
///
/// [`NntpError::Format`] when the article number is missing or not a
/// non-negative integer.
pub fn parse_overview_line(line: &str) -> Result<OverviewRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

    let number = field(0).trim().parse::<u64>().map_err(|_| {
        NntpError::Format(format!(
            "malformed overview article number in {:?}",
            line.chars().take(100).collect::<String>()
        ))
    })?;

    let mut references = split_references(field(5));
    let mut run_end = 6;
    while run_end < fields.len() && is_reference_continuation(&fields[run_end..]) {
        run_end += 1;
    }

    // A wrapped run only counts when the byte count follows it
    let mut idx = 6;
    if run_end > idx && field(run_end).trim().parse::<u64>().is_ok() {
        for wrapped in &fields[idx..run_end] {
            references.extend(split_references(wrapped));
        }
        idx = run_end;
    }

    Ok(OverviewRecord {
        number,
        subject: field(1).to_string(),
        from: field(2).to_string(),
        date: parse_news_date(field(3)),
        message_id: field(4).to_string(),
        references,
        bytes: parse_count(field(idx)),
        lines: parse_count(field(idx + 1)),
        extra: fields
            .get(idx + 2..)
            .map(|rest| rest.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default(),
    })
}

fn split_references(field: &str) -> Vec<String> {
    field.split_whitespace().map(str::to_string).collect()
}

/// A field continues the references column if it holds message-ids, or is
/// empty and the next non-empty field holds message-ids
fn is_reference_continuation(rest: &[&str]) -> bool {
    let starts_ids = |f: &str| f.trim_start().starts_with('<');
    match rest.first() {
        Some(f) if starts_ids(f) => true,
        Some(f) if f.trim().is_empty() => rest[1..]
            .iter()
            .find(|f| !f.trim().is_empty())
            .is_some_and(|f| starts_ids(f)),
        _ => false,
    }
}

fn parse_count(field: &str) -> u64 {
    field.trim().parse().unwrap_or(0)
}
