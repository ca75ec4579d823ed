//! Line channel and body stepping
//!
//! Everything that touches the wire goes through here: writing command
//! lines, reading status lines, stepping through dot-terminated and
//! compressed bodies, and draining a body nobody finished reading.

use super::body::BodyLine;
use super::state::{Inflate, OpenBody};
use super::{NntpClient, NntpIo};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::NntpResponse;
use flate2::{FlushDecompress, Status};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, trace, warn};

/// Output space reserved per inflate step
const INFLATE_CHUNK: usize = 32 * 1024;

/// Remove one leading dot from a stuffed line, in place
///
/// Shifts the remaining bytes left by one; only lines starting with ".."
/// are touched.
pub(super) fn unstuff(line: &mut Vec<u8>) {
    if line.starts_with(b"..") {
        line.remove(0);
    }
}

/// Strip a trailing LF and an optional CR before it
fn chomp(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

impl<S: NntpIo> NntpClient<S> {
    /// Write one line followed by CRLF and flush
    ///
    /// Any body left open on the stream is drained first, so the reply to
    /// this line is the next thing read.
    pub(super) async fn write_line(&mut self, line: &str) -> Result<()> {
        if self.open_body.is_some() {
            debug!("Draining unread response body before next command");
            self.finish_open_body().await?;
        }

        if line.starts_with("AUTHINFO PASS") {
            trace!("Sending command: AUTHINFO PASS ****");
        } else {
            trace!("Sending command: {}", line);
        }

        let result = async {
            let writer = self.stream.get_mut();
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\r\n").await?;
            writer.flush().await?;
            Ok::<(), NntpError>(())
        }
        .await;
        self.note_desync(result)
    }

    /// Read one line with its terminator (CRLF or bare LF) removed
    pub(super) async fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::with_capacity(256);
        let result = match self.stream.read_until(b'\n', &mut line).await {
            Ok(0) => Err(NntpError::ConnectionClosed),
            Ok(_) => {
                chomp(&mut line);
                Ok(line)
            }
            Err(e) => Err(NntpError::Io(e)),
        };
        self.note_desync(result)
    }

    /// Read and parse a status line
    pub(super) async fn read_status(&mut self) -> Result<NntpResponse> {
        let line = self.read_line().await?;
        let line = String::from_utf8_lossy(&line);
        trace!("Received: {}", line);

        let result = commands::parse_single_response(&line);
        self.note_desync(result)
    }

    /// Send a command and read its status line
    pub(super) async fn command(&mut self, command: &str) -> Result<NntpResponse> {
        self.write_line(command).await?;
        self.read_status().await
    }

    /// Send a command whose success response carries a dot-terminated body
    /// and collect that body as text lines
    ///
    /// Failure statuses come back as a response with no lines.
    pub(super) async fn multiline_command(&mut self, command: &str) -> Result<NntpResponse> {
        let mut response = self.command(command).await?;
        if !response.has_body() {
            return Ok(response);
        }

        self.open_multiline();
        while let BodyLine::More(line) = self.next_multiline_line().await? {
            response
                .lines
                .push(String::from_utf8_lossy(&line).into_owned());
        }
        Ok(response)
    }

    /// Next content line of the open dot-terminated body
    pub(super) async fn next_multiline_line(&mut self) -> Result<BodyLine> {
        if !matches!(self.open_body, Some(OpenBody::Multiline)) {
            return Ok(BodyLine::End);
        }

        let mut line = match self.read_line().await {
            Ok(line) => line,
            Err(e) => {
                self.open_body = None;
                return Err(e);
            }
        };
        if line == b"." {
            self.open_body = None;
            return Ok(BodyLine::End);
        }

        unstuff(&mut line);
        Ok(BodyLine::More(line))
    }

    /// Step the inflater: decompress some of the buffered input
    ///
    /// Returns the number of decompressed bytes appended to the pending
    /// buffer; 0 once the zlib stream (trailer included) has ended. Only the
    /// compressed bytes the inflater actually used are consumed from the
    /// stream, so the clear-text terminator stays in the buffer.
    pub(super) async fn inflate_step(&mut self) -> Result<usize> {
        let result = self.inflate_step_inner().await;
        if result.is_err() {
            self.open_body = None;
        }
        self.note_desync(result)
    }

    async fn inflate_step_inner(&mut self) -> Result<usize> {
        let Some(OpenBody::Compressed(inflate)) = self.open_body.as_mut() else {
            return Ok(0);
        };

        loop {
            if inflate.finished {
                return Ok(0);
            }

            if inflate.pos == inflate.pending.len() {
                inflate.pending.clear();
                inflate.pos = 0;
            }
            inflate.pending.reserve(INFLATE_CHUNK);

            let input = self.stream.fill_buf().await?;
            if input.is_empty() {
                return Err(NntpError::Decode(
                    "compressed body truncated: connection closed".to_string(),
                ));
            }

            let before_in = inflate.decompress.total_in();
            let before_out = inflate.decompress.total_out();
            let status = inflate
                .decompress
                .decompress_vec(input, &mut inflate.pending, FlushDecompress::None)
                .map_err(|e| NntpError::Decode(format!("zlib: {}", e)))?;
            let consumed = (inflate.decompress.total_in() - before_in) as usize;
            let produced = (inflate.decompress.total_out() - before_out) as usize;
            self.stream.consume(consumed);

            if status == Status::StreamEnd {
                trace!(
                    "Compressed body ended: {} bytes in, {} bytes out",
                    inflate.decompress.total_in(),
                    inflate.decompress.total_out()
                );
                inflate.finished = true;
            }

            if produced > 0 || inflate.finished {
                return Ok(produced);
            }
            if consumed == 0 {
                return Err(NntpError::Decode(
                    "zlib stream made no progress".to_string(),
                ));
            }
        }
    }

    /// Next line of decompressed content
    ///
    /// Lines are dot-unstuffed and a "." line ends the content; a final
    /// line without LF is still returned.
    pub(super) async fn next_compressed_line(&mut self) -> Result<BodyLine> {
        loop {
            let Some(OpenBody::Compressed(inflate)) = self.open_body.as_mut() else {
                return Ok(BodyLine::End);
            };
            if inflate.content_done {
                return Ok(BodyLine::End);
            }

            let unread = inflate.unread();
            let split = unread.iter().position(|&b| b == b'\n');
            if split.is_some() || (inflate.finished && !unread.is_empty()) {
                let len = split.map_or(unread.len(), |idx| idx + 1);
                let mut line = unread[..len].to_vec();
                inflate.pos += len;
                chomp(&mut line);

                if line == b"." {
                    inflate.content_done = true;
                    return Ok(BodyLine::End);
                }
                unstuff(&mut line);
                return Ok(BodyLine::More(line));
            }

            if inflate.finished {
                inflate.content_done = true;
                return Ok(BodyLine::End);
            }
            self.inflate_step().await?;
        }
    }

    /// Copy raw decompressed bytes into `buf`; 0 at end of the zlib stream
    pub(super) async fn read_compressed(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let Some(OpenBody::Compressed(inflate)) = self.open_body.as_mut() else {
                return Ok(0);
            };

            let unread = inflate.unread();
            if !unread.is_empty() {
                let n = unread.len().min(buf.len());
                buf[..n].copy_from_slice(&unread[..n]);
                inflate.pos += n;
                return Ok(n);
            }
            if inflate.finished {
                return Ok(0);
            }
            self.inflate_step().await?;
        }
    }

    /// Next content line of whichever body is open
    pub(super) async fn next_body_line(&mut self) -> Result<BodyLine> {
        match self.open_body {
            Some(OpenBody::Compressed(_)) => self.next_compressed_line().await,
            _ => self.next_multiline_line().await,
        }
    }

    /// Consume the rest of the open body, if any, leaving the stream at the
    /// next status line
    ///
    /// For a compressed body this also validates the zlib trailer and the
    /// clear-text "." line after it.
    pub(super) async fn finish_open_body(&mut self) -> Result<()> {
        match self.open_body {
            None => Ok(()),
            Some(OpenBody::Multiline) => {
                let mut discarded = 0usize;
                while let BodyLine::More(_) = self.next_multiline_line().await? {
                    discarded += 1;
                }
                if discarded > 0 {
                    debug!("Discarded {} unread body lines", discarded);
                }
                Ok(())
            }
            Some(OpenBody::Compressed(_)) => {
                while self.inflate_step().await? > 0 {
                    if let Some(OpenBody::Compressed(inflate)) = self.open_body.as_mut() {
                        inflate.pending.clear();
                        inflate.pos = 0;
                    }
                }
                self.open_body = None;

                let line = self.read_line().await?;
                if line != b"." {
                    let err = NntpError::Framing(format!(
                        "expected \".\" after compressed body, got {:?}",
                        String::from_utf8_lossy(&line)
                    ));
                    warn!("{}", err);
                    return self.note_desync(Err(err));
                }
                Ok(())
            }
        }
    }

    /// Start a compressed body on the stream
    pub(super) fn open_compressed(&mut self) {
        self.open_body = Some(OpenBody::Compressed(Box::new(Inflate::new())));
    }

    /// Start a dot-terminated body on the stream
    pub(super) fn open_multiline(&mut self) {
        self.open_body = Some(OpenBody::Multiline);
    }

    /// Mark the connection broken when `result` is a desynchronizing error
    pub(super) fn note_desync<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result
            && e.is_desync()
        {
            self.mark_broken();
        }
        result
    }
}
