//! Overview and header engines
//!
//! Three command variants answer the same query. The compressed one
//! (XZVER / XZHDR) is tried first unless this connection has already seen
//! the server reject it; then the RFC 3977 name (OVER / HDR); then the
//! RFC 2980 name (XOVER / XHDR). Only the compressed tier's outcome is
//! remembered. Each attempt consumes its status line and any body before
//! the next command goes out.

use super::body::{BodyLine, CompressedBody};
use super::{NntpClient, NntpIo};
use crate::capabilities::Support;
use crate::commands::{self, HdrEntry, OverviewRecord};
use crate::error::Result;
use tracing::{debug, trace};

const XZVER: &str = "XZVER";
const XZHDR: &str = "XZHDR";

/// Command variant being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// zlib-compressed body, support cached per connection
    Compressed,
    /// RFC 3977 command
    Standard,
    /// RFC 2980 command
    Legacy,
}

impl Tier {
    fn fallback(self) -> Option<Tier> {
        match self {
            Tier::Compressed => Some(Tier::Standard),
            Tier::Standard => Some(Tier::Legacy),
            Tier::Legacy => None,
        }
    }
}

impl<S: NntpIo> NntpClient<S> {
    /// Fetch overview records for the inclusive range `lo..=hi`
    ///
    /// Uses XZVER when the server supports it, falling back to OVER and
    /// then XOVER. A failed XZVER is not sent again on this connection.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - XOVER failed too;
    ///   carries its status
    /// - [`NntpError::Format`](crate::NntpError::Format) - a record had a
    ///   malformed article number (the body has been consumed)
    /// - [`NntpError::Decode`](crate::NntpError::Decode) /
    ///   [`NntpError::Framing`](crate::NntpError::Framing) - the compressed
    ///   body was corrupt; the connection is broken
    pub async fn overview(&mut self, lo: u64, hi: u64) -> Result<Vec<OverviewRecord>> {
        let range = commands::range(lo, hi);
        trace!("Fetching overview: {}", range);

        self.fetch_tiered(
            XZVER,
            |tier| match tier {
                Tier::Compressed => commands::xzver(&range),
                Tier::Standard => commands::over(&range),
                Tier::Legacy => commands::xover(&range),
            },
            |line| commands::parse_overview_line(line).map(Some),
        )
        .await
    }

    /// Fetch one header field for the inclusive range `lo..=hi`
    ///
    /// Same fallback as [`overview`](Self::overview) over XZHDR, HDR and
    /// XHDR. Lines without a leading article number are skipped.
    pub async fn headers(&mut self, field: &str, lo: u64, hi: u64) -> Result<Vec<HdrEntry>> {
        let range = commands::range(lo, hi);
        trace!("Fetching {} headers: {}", field, range);

        self.fetch_tiered(
            XZHDR,
            |tier| match tier {
                Tier::Compressed => commands::xzhdr(field, &range),
                Tier::Standard => commands::hdr(field, &range),
                Tier::Legacy => commands::xhdr(field, &range),
            },
            |line| Ok(commands::parse_hdr_line(line)),
        )
        .await
    }

    /// Send XZVER for `lo..=hi` and hand back the raw compressed body
    ///
    /// Records the outcome in the extension cache like
    /// [`overview`](Self::overview) does, but does not fall back.
    pub async fn xzver(&mut self, lo: u64, hi: u64) -> Result<CompressedBody<'_, S>> {
        let response = self.command(&commands::xzver(&commands::range(lo, hi))).await?;
        if !response.has_body() {
            self.record_extension(XZVER, Support::Unsupported);
            return Err(commands::status_error(response));
        }
        self.record_extension(XZVER, Support::Supported);
        Ok(CompressedBody::new(self))
    }

    fn record_extension(&mut self, keyword: &str, support: Support) {
        if self.extensions.get(keyword) != support {
            debug!("{} support on this connection: {:?}", keyword, support);
            self.extensions.record(keyword, support);
        }
    }

    async fn fetch_tiered<T>(
        &mut self,
        compressed_keyword: &str,
        build: impl Fn(Tier) -> String,
        parse: impl Fn(&str) -> Result<Option<T>>,
    ) -> Result<Vec<T>> {
        let mut tier = if self.extensions.is_unsupported(compressed_keyword) {
            Tier::Standard
        } else {
            Tier::Compressed
        };

        let response = loop {
            let response = self.command(&build(tier)).await?;
            if response.has_body() {
                break response;
            }

            if tier == Tier::Compressed {
                self.record_extension(compressed_keyword, Support::Unsupported);
            }
            match tier.fallback() {
                Some(next) => {
                    debug!(
                        "{:?} tier rejected ({} {}), trying {:?}",
                        tier, response.code, response.message, next
                    );
                    tier = next;
                }
                None => return Err(commands::status_error(response)),
            }
        };

        if tier == Tier::Compressed {
            self.record_extension(compressed_keyword, Support::Supported);
            self.open_compressed();
        } else {
            self.open_multiline();
        }
        trace!("{:?} tier accepted: {} {}", tier, response.code, response.message);
        self.collect_records(parse).await
    }

    /// Parse every body line, then consume the terminator
    ///
    /// A parse error stops parsing but not reading: the rest of the body is
    /// drained before the first error is returned.
    async fn collect_records<T>(
        &mut self,
        parse: impl Fn(&str) -> Result<Option<T>>,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut first_error = None;

        while let BodyLine::More(line) = self.next_body_line().await? {
            if first_error.is_some() {
                continue;
            }
            match parse(&String::from_utf8_lossy(&line)) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => trace!("Skipping line: {:?}", String::from_utf8_lossy(&line)),
                Err(e) => first_error = Some(e),
            }
        }
        self.finish_open_body().await?;

        match first_error {
            Some(e) => Err(e),
            None => {
                debug!("Parsed {} records", records.len());
                Ok(records)
            }
        }
    }
}
