//! LIST family commands and active-file parsing

/// Build LIST command (implicit LIST ACTIVE)
pub fn list() -> &'static str {
    "LIST"
}

/// Build LIST ACTIVE command with a wildmat (RFC 3977 §7.6.3)
pub fn list_active(wildmat: &str) -> String {
    format!("LIST ACTIVE {}", wildmat)
}

/// Active newsgroup entry from LIST ACTIVE or NEWGROUPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGroup {
    /// Newsgroup name
    pub name: String,
    /// Highest article number
    pub high: u64,
    /// Lowest article number
    pub low: u64,
    /// Posting status (`y`, `n`, `m`, or `=alias`)
    pub status: String,
}

/// Parse an active-file line: "group high low status"
///
/// Returns `None` for lines with fewer than four fields. Watermarks may be
/// zero-padded (`000008`).
pub fn parse_active_line(line: &str) -> Option<ActiveGroup> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let high = parts.next()?;
    let low = parts.next()?;
    let status = parts.next()?;

    Some(ActiveGroup {
        name: name.to_string(),
        high: high.parse().unwrap_or(0),
        low: low.parse().unwrap_or(0),
        status: status.to_string(),
    })
}
