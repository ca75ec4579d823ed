//! Streaming readers for response bodies
//!
//! A reader holds the client's mutable borrow for as long as it lives. It
//! can be consumed line by line or byte by byte. [`close`] drains whatever
//! is left; a reader that is simply dropped is drained before the next
//! command is written.
//!
//! [`close`]: MultilineBody::close

use super::{NntpClient, NntpIo};
use crate::error::Result;

/// One step through a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    /// A content line, terminator stripped and dot-unstuffed
    More(Vec<u8>),
    /// The body has ended
    End,
}

/// Bytes of the current line not yet handed out by a byte-wise read
#[derive(Debug, Default)]
pub(super) struct LineBuf {
    data: Vec<u8>,
    pos: usize,
}

impl LineBuf {
    pub(super) fn is_drained(&self) -> bool {
        self.pos == self.data.len()
    }

    pub(super) fn fill(&mut self, data: Vec<u8>) {
        self.data = data;
        self.pos = 0;
    }

    pub(super) fn copy_to(&mut self, buf: &mut [u8]) -> usize {
        let n = (self.data.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    pub(super) fn take(&mut self) -> Vec<u8> {
        let rest = self.data.split_off(self.pos);
        self.data.clear();
        self.pos = 0;
        rest
    }
}

/// Reader over a dot-terminated response body
///
/// Yields content lines until the lone "." terminator. Lines that began
/// with ".." have one leading dot removed.
pub struct MultilineBody<'a, S: NntpIo> {
    client: &'a mut NntpClient<S>,
    pending: LineBuf,
}

impl<'a, S: NntpIo> MultilineBody<'a, S> {
    pub(super) fn new(client: &'a mut NntpClient<S>) -> Self {
        client.open_multiline();
        Self {
            client,
            pending: LineBuf::default(),
        }
    }

    /// Next content line, or [`BodyLine::End`] once the terminator was read
    ///
    /// Keeps returning `End` after the body is exhausted.
    pub async fn next_line(&mut self) -> Result<BodyLine> {
        self.client.next_multiline_line().await
    }

    /// Read body bytes into `buf`, each line followed by `\n`
    ///
    /// Returns 0 at the end of the body. Do not mix with
    /// [`next_line`](Self::next_line) mid-line.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_drained() {
            match self.next_line().await? {
                BodyLine::More(mut line) => {
                    line.push(b'\n');
                    self.pending.fill(line);
                }
                BodyLine::End => return Ok(0),
            }
        }
        Ok(self.pending.copy_to(buf))
    }

    /// Read the remaining body, each line followed by `\n`
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = self.pending.take();
        while let BodyLine::More(line) = self.next_line().await? {
            out.extend_from_slice(&line);
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Read the remaining lines as (lossy) UTF-8 text
    pub async fn lines(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        while let BodyLine::More(line) = self.next_line().await? {
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        Ok(lines)
    }

    /// Whether the terminator has been consumed
    pub fn is_done(&self) -> bool {
        self.client.open_body.is_none()
    }

    /// Discard the rest of the body through its terminator
    pub async fn close(self) -> Result<()> {
        self.client.finish_open_body().await
    }
}

/// Reader over a zlib-compressed body followed by a clear-text "." line
///
/// Line-wise access dot-unstuffs decompressed lines and treats a
/// decompressed "." line as the end of content. Byte-wise access returns
/// the decompressed stream untouched.
pub struct CompressedBody<'a, S: NntpIo> {
    client: &'a mut NntpClient<S>,
}

impl<'a, S: NntpIo> CompressedBody<'a, S> {
    pub(super) fn new(client: &'a mut NntpClient<S>) -> Self {
        client.open_compressed();
        Self { client }
    }

    /// Next decompressed content line
    pub async fn next_line(&mut self) -> Result<BodyLine> {
        self.client.next_compressed_line().await
    }

    /// Read raw decompressed bytes; 0 at the end of the zlib stream
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.client.read_compressed(buf).await
    }

    /// Read all remaining decompressed bytes
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = self.read(&mut chunk).await?;
            if n == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&chunk[..n]);
        }
    }

    /// Finish the zlib stream, validating its trailer, then require the
    /// clear-text "." line
    ///
    /// # Errors
    ///
    /// - [`NntpError::Decode`](crate::NntpError::Decode) - corrupt or truncated zlib data
    /// - [`NntpError::Framing`](crate::NntpError::Framing) - the line after the
    ///   zlib stream was not "."
    pub async fn close(self) -> Result<()> {
        self.client.finish_open_body().await
    }
}
