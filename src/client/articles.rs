//! Article retrieval and navigation commands (RFC 3977 §6)
//!
//! - ARTICLE / HEAD / BODY - stream an article, its headers or its body
//! - STAT - check an article without retrieving content
//! - NEXT / LAST - move the current article pointer

use crate::commands::{self, ArticleInfo};
use crate::response::codes;
use crate::{NntpError, NntpResponse, Result};
use tracing::trace;

use super::body::MultilineBody;
use super::yenc::YencBody;
use super::{NntpClient, NntpIo};

/// An article being received
///
/// The body reader borrows the connection; read it, or close it, before
/// the next command. Dropping it is also fine: the rest is drained when the
/// next command is sent.
pub struct Article<'a, S: NntpIo> {
    /// Article number (0 when requested by message-id on some servers)
    pub number: u64,
    /// Message identifier
    pub message_id: String,
    /// Response body: full article, headers or body depending on the command
    pub body: MultilineBody<'a, S>,
}

impl<'a, S: NntpIo> Article<'a, S> {
    /// Discard whatever is left of the response body
    pub async fn close(self) -> Result<()> {
        self.body.close().await
    }
}

/// Map a failed article-level status to the matching error
fn article_error(response: NntpResponse, id: &str) -> NntpError {
    match response.code {
        codes::NO_SUCH_GROUP => NntpError::NoSuchGroup(response.message),
        codes::NO_GROUP_SELECTED => NntpError::NoGroupSelected,
        codes::NO_CURRENT_ARTICLE
        | codes::NO_NEXT_ARTICLE
        | codes::NO_PREV_ARTICLE
        | codes::NO_SUCH_ARTICLE_NUMBER
        | codes::NO_SUCH_ARTICLE_ID => NntpError::NoSuchArticle(if id.is_empty() {
            response.message
        } else {
            id.to_string()
        }),
        _ => commands::status_error(response),
    }
}

impl<S: NntpIo> NntpClient<S> {
    /// Send an article-level command and parse its success status
    ///
    /// `expected` is the success code the command answers with. For the
    /// body-bearing codes the body is marked open before the status text is
    /// parsed, so a malformed status still gets its body drained.
    async fn article_status(
        &mut self,
        command: &str,
        id: &str,
        expected: u16,
    ) -> Result<ArticleInfo> {
        let response = self.command(command).await?;
        if !response.is_success() {
            return Err(article_error(response, id));
        }
        if response.code != expected {
            // Whether a body follows is unknown
            let err = NntpError::InvalidResponse(format!(
                "expected {}, got {} {}",
                expected, response.code, response.message
            ));
            return self.note_desync(Err(err));
        }
        if expected != codes::ARTICLE_STAT {
            self.open_multiline();
        }
        let info = commands::parse_article_status(&response)?;

        // Requests by number (or none) move the current article pointer
        if !id.starts_with('<') && info.number > 0 {
            self.set_current_article(info.number);
        }
        Ok(info)
    }

    async fn open_article(
        &mut self,
        command: &str,
        id: &str,
        expected: u16,
    ) -> Result<Article<'_, S>> {
        trace!("Fetching: {}", command);
        let info = self.article_status(command, id, expected).await?;
        Ok(Article {
            number: info.number,
            message_id: info.message_id,
            body: MultilineBody::new(self),
        })
    }

    /// Fetch a full article (headers, blank line, body)
    ///
    /// `id` is an article number, a message-id, or empty for the current
    /// article.
    ///
    /// # Errors
    ///
    /// - [`NntpError::NoSuchArticle`] - the article does not exist
    /// - [`NntpError::NoGroupSelected`] - a number was given with no group selected
    /// - [`NntpError::Protocol`] - any other failure status
    pub async fn article(&mut self, id: &str) -> Result<Article<'_, S>> {
        self.open_article(&commands::article(id), id, codes::ARTICLE_FOLLOWS)
            .await
    }

    /// Fetch article headers only
    ///
    /// # Errors
    ///
    /// As for [`article`](Self::article).
    pub async fn head(&mut self, id: &str) -> Result<Article<'_, S>> {
        self.open_article(&commands::head(id), id, codes::HEAD_FOLLOWS)
            .await
    }

    /// Fetch article body only
    ///
    /// # Errors
    ///
    /// As for [`article`](Self::article).
    pub async fn body(&mut self, id: &str) -> Result<Article<'_, S>> {
        self.open_article(&commands::body(id), id, codes::BODY_FOLLOWS)
            .await
    }

    /// Fetch an article body and decode it as single-part yEnc
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_stream::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> nntp_stream::Result<()> {
    /// let mut part = client.body_yenc("<part1@example.com>").await?;
    /// let data = part.read_to_end().await?;
    /// part.close().await?;
    /// println!("decoded {} bytes", data.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn body_yenc(&mut self, id: &str) -> Result<YencBody<'_, S>> {
        let article = self.body(id).await?;
        Ok(YencBody::new(article.body))
    }

    /// Check article status without retrieving content (RFC 3977 §6.2.4)
    ///
    /// Returns the article number (0 for some servers when a message-id
    /// was given) and message-id.
    pub async fn stat(&mut self, id: &str) -> Result<ArticleInfo> {
        self.article_status(&commands::stat(id), id, codes::ARTICLE_STAT)
            .await
    }

    /// Move to the next article in the current group (RFC 3977 §6.1.4)
    ///
    /// # Errors
    ///
    /// - [`NntpError::NoGroupSelected`] - no group selected
    /// - [`NntpError::NoSuchArticle`] - already at the last article
    pub async fn next(&mut self) -> Result<ArticleInfo> {
        self.article_status(commands::next(), "", codes::ARTICLE_STAT)
            .await
    }

    /// Move to the previous article in the current group (RFC 3977 §6.1.3)
    ///
    /// # Errors
    ///
    /// - [`NntpError::NoGroupSelected`] - no group selected
    /// - [`NntpError::NoSuchArticle`] - already at the first article
    pub async fn last(&mut self) -> Result<ArticleInfo> {
        self.article_status(commands::last(), "", codes::ARTICLE_STAT)
            .await
    }
}
