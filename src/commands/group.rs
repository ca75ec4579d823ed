//! Group selection and newsgroup-related commands

use crate::date::format_command_date;
use crate::error::{NntpError, Result};
use crate::response::{NntpResponse, codes};
use chrono::{DateTime, Utc};

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}", newsgroup)
}

/// Build NEWGROUPS command (RFC 3977 §7.3)
///
/// Format: `NEWGROUPS yyyymmdd hhmmss GMT`
pub fn newgroups(since: DateTime<Utc>) -> String {
    format!("NEWGROUPS {}", format_command_date(since))
}

/// Build NEWNEWS command (RFC 3977 §7.4)
///
/// Format: `NEWNEWS wildmat yyyymmdd hhmmss GMT`
pub fn newnews(wildmat: &str, since: DateTime<Utc>) -> String {
    format!("NEWNEWS {} {}", wildmat, format_command_date(since))
}

/// Group descriptor returned by the GROUP command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// Newsgroup name as reported by the server
    pub name: String,
    /// Estimated number of articles in the group
    pub count: u64,
    /// Low watermark
    pub low: u64,
    /// High watermark
    pub high: u64,
}

/// Parse GROUP response
///
/// Response format: "211 count low high group-name"
pub fn parse_group_response(response: NntpResponse, requested: &str) -> Result<GroupInfo> {
    if response.code != codes::GROUP_SELECTED {
        return Err(NntpError::Protocol {
            code: response.code,
            message: response.message,
        });
    }

    let parts: Vec<&str> = response.message.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(NntpError::InvalidResponse(response.message));
    }

    let number = |idx: usize| -> Result<u64> {
        parts[idx]
            .parse()
            .map_err(|_| NntpError::InvalidResponse(response.message.clone()))
    };

    Ok(GroupInfo {
        count: number(0)?,
        low: number(1)?,
        high: number(2)?,
        name: parts.get(3).unwrap_or(&requested).to_string(),
    })
}
