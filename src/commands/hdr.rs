//! XZHDR/HDR/XHDR commands and header field parsing

/// Build XZHDR command (zlib-compressed header listing extension)
pub fn xzhdr(header: &str, range: &str) -> String {
    format!("XZHDR {} {}", header, range)
}

/// Build HDR command (RFC 3977 §8.5)
///
/// Format: HDR header-name range
pub fn hdr(header: &str, range: &str) -> String {
    format!("HDR {} {}", header, range)
}

/// Build XHDR command (RFC 2980 legacy name of HDR)
pub fn xhdr(header: &str, range: &str) -> String {
    format!("XHDR {} {}", header, range)
}

/// Article number and header value from one HDR-style line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdrEntry {
    /// Article number within the newsgroup
    pub number: u64,
    /// Header field value (empty when the article lacks the header)
    pub value: String,
}

/// Parse one HDR/XHDR/XZHDR line: "article-number header-value"
///
/// Everything after the first space is the value. Returns `None` when the
/// first token is not an article number.
///
/// # Examples
///
/// ```
/// # use nntp_stream::commands::parse_hdr_line;
/// let entry = parse_hdr_line("12345 Re: Test Subject").unwrap();
/// assert_eq!(entry.number, 12345);
/// assert_eq!(entry.value, "Re: Test Subject");
/// ```
pub fn parse_hdr_line(line: &str) -> Option<HdrEntry> {
    let (number, value) = line.split_once(' ').unwrap_or((line, ""));

    Some(HdrEntry {
        number: number.trim().parse().ok()?,
        value: value.to_string(),
    })
}
