//! Session-level commands
//!
//! RFC 3977 §5.2 (CAPABILITIES), §5.3 (MODE READER), §5.4 (QUIT),
//! §7.1 (DATE) and RFC 2980 LIST EXTENSIONS.

use super::state::ConnectionState;
use super::{NntpClient, NntpIo};
use crate::capabilities::Capabilities;
use crate::commands;
use crate::date::parse_server_date;
use crate::error::{NntpError, Result};
use crate::response::codes;
use chrono::{DateTime, Utc};
use tracing::debug;

impl<S: NntpIo> NntpClient<S> {
    /// Request server capabilities (RFC 3977 Section 5.2)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_stream::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> nntp_stream::Result<()> {
    /// let caps = client.capabilities().await?;
    /// if caps.has_arg("OVER", "MSGID") {
    ///     println!("OVER accepts message-ids");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`NntpError::Protocol`] when the server does not answer 101.
    pub async fn capabilities(&mut self) -> Result<Capabilities> {
        debug!("Requesting server capabilities");

        let response = self.multiline_command(commands::capabilities()).await?;
        if response.code != codes::CAPABILITY_LIST {
            return Err(commands::status_error(response));
        }

        let caps = Capabilities::parse(&response.lines);
        debug!("Received {} capabilities", caps.list().len());
        Ok(caps)
    }

    /// List the extensions a pre-RFC 3977 server supports (LIST EXTENSIONS)
    ///
    /// Returns one entry per line, e.g. `XZVER` or `XZHDR`.
    pub async fn list_extensions(&mut self) -> Result<Vec<String>> {
        let response = self.multiline_command(commands::list_extensions()).await?;
        if response.code != codes::EXTENSIONS_FOLLOW {
            return Err(commands::status_error(response));
        }

        Ok(response
            .lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Switch to reader mode (RFC 3977 Section 5.3)
    ///
    /// Returns `true` if posting is allowed (200), `false` if not (201).
    pub async fn mode_reader(&mut self) -> Result<bool> {
        debug!("Switching to reader mode");

        let response = self.command(commands::mode_reader()).await?;
        match response.code {
            codes::READY_POSTING_ALLOWED => Ok(true),
            codes::READY_NO_POSTING => Ok(false),
            _ => Err(commands::status_error(response)),
        }
    }

    /// Ask the server for its current time (RFC 3977 Section 7.1)
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`] - the server does not answer 111
    /// - [`NntpError::InvalidResponse`] - the timestamp is not `yyyymmddhhmmss`
    pub async fn date(&mut self) -> Result<DateTime<Utc>> {
        debug!("Requesting server date/time");

        let response = self.command(commands::date()).await?;
        if response.code != codes::SERVER_DATE {
            return Err(commands::status_error(response));
        }

        let date = parse_server_date(&response.message)?;
        debug!("Server date/time: {}", date);
        Ok(date)
    }

    /// Close the session (RFC 3977 Section 5.4)
    ///
    /// # Errors
    ///
    /// [`NntpError::Protocol`] when the server does not answer 205.
    pub async fn quit(&mut self) -> Result<()> {
        debug!("Closing NNTP connection");

        let response = self.command(commands::quit()).await?;
        self.state = ConnectionState::Closed;

        if response.code != codes::CLOSING_CONNECTION {
            return Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            });
        }
        Ok(())
    }
}
