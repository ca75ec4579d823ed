//! Article retrieval and navigation commands

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Append an optional argument to a command keyword
///
/// An empty `id` addresses the currently selected article.
fn with_id(keyword: &str, id: &str) -> String {
    if id.is_empty() {
        keyword.to_string()
    } else {
        format!("{} {}", keyword, id)
    }
}

/// Build ARTICLE command
pub fn article(id: &str) -> String {
    with_id("ARTICLE", id)
}

/// Build HEAD command
pub fn head(id: &str) -> String {
    with_id("HEAD", id)
}

/// Build BODY command
pub fn body(id: &str) -> String {
    with_id("BODY", id)
}

/// Build STAT command (RFC 3977 §6.2.4)
pub fn stat(id: &str) -> String {
    with_id("STAT", id)
}

/// Build NEXT command (RFC 3977 §6.1.4)
pub fn next() -> &'static str {
    "NEXT"
}

/// Build LAST command (RFC 3977 §6.1.3)
pub fn last() -> &'static str {
    "LAST"
}

/// Article number and message-id from a 220-223 status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// Article number (0 if the article was requested by message-id)
    pub number: u64,
    /// Message identifier (e.g., "<abc@example.com>")
    pub message_id: String,
}

/// Parse the `n message-id [text]` payload shared by ARTICLE, HEAD, BODY,
/// STAT, NEXT and LAST success responses
pub fn parse_article_status(response: &NntpResponse) -> Result<ArticleInfo> {
    let mut parts = response.message.split_whitespace();

    let number = parts
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| NntpError::InvalidResponse(response.message.clone()))?;

    let message_id = parts
        .next()
        .ok_or_else(|| NntpError::InvalidResponse(response.message.clone()))?
        .to_string();

    Ok(ArticleInfo { number, message_id })
}
