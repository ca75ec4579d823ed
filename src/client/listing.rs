//! Newsgroup listing commands
//!
//! - LIST / LIST ACTIVE (RFC 3977 §7.6.3)
//! - NEWGROUPS (RFC 3977 §7.3)
//! - NEWNEWS (RFC 3977 §7.4)

use super::{NntpClient, NntpIo};
use crate::commands::{self, ActiveGroup};
use crate::error::Result;
use crate::response::codes;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

fn parse_active_lines(lines: &[String]) -> Vec<ActiveGroup> {
    lines
        .iter()
        .filter_map(|line| {
            let group = commands::parse_active_line(line);
            if group.is_none() {
                warn!("Skipping malformed active line: {:?}", line);
            }
            group
        })
        .collect()
}

impl<S: NntpIo> NntpClient<S> {
    /// List every newsgroup the server carries (LIST)
    ///
    /// # Errors
    ///
    /// [`NntpError::Protocol`](crate::NntpError::Protocol) when the server does not answer 215.
    pub async fn list(&mut self) -> Result<Vec<ActiveGroup>> {
        self.list_with(commands::list()).await
    }

    /// List newsgroups matching a wildmat (LIST ACTIVE wildmat)
    pub async fn list_active(&mut self, wildmat: &str) -> Result<Vec<ActiveGroup>> {
        self.list_with(&commands::list_active(wildmat)).await
    }

    async fn list_with(&mut self, command: &str) -> Result<Vec<ActiveGroup>> {
        debug!("Listing newsgroups: {}", command);

        let response = self.multiline_command(command).await?;
        if response.code != codes::LIST_INFORMATION_FOLLOWS {
            return Err(commands::status_error(response));
        }

        let groups = parse_active_lines(&response.lines);
        debug!("Retrieved {} newsgroups", groups.len());
        Ok(groups)
    }

    /// Newsgroups created since `since` (NEWGROUPS, always in GMT)
    pub async fn newgroups(&mut self, since: DateTime<Utc>) -> Result<Vec<ActiveGroup>> {
        debug!("Requesting newsgroups created since {}", since);

        let response = self.multiline_command(&commands::newgroups(since)).await?;
        if response.code != codes::NEW_NEWSGROUPS_FOLLOW {
            return Err(commands::status_error(response));
        }

        Ok(parse_active_lines(&response.lines))
    }

    /// Message-ids of articles posted to groups matching `wildmat` since
    /// `since` (NEWNEWS, always in GMT)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_stream::NntpClient;
    /// # use chrono::{TimeZone, Utc};
    /// # async fn example(client: &mut NntpClient) -> nntp_stream::Result<()> {
    /// let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let ids = client.newnews("comp.lang.rust", since).await?;
    /// println!("Found {} new articles", ids.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn newnews(&mut self, wildmat: &str, since: DateTime<Utc>) -> Result<Vec<String>> {
        debug!("Requesting articles since {} in {}", since, wildmat);

        let response = self
            .multiline_command(&commands::newnews(wildmat, since))
            .await?;
        if response.code != codes::NEW_ARTICLE_LIST_FOLLOWS {
            return Err(commands::status_error(response));
        }

        let ids: Vec<String> = response
            .lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        debug!("Retrieved {} message-IDs", ids.len());
        Ok(ids)
    }
}
