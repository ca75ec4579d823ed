//! yEnc-decoding reader over an article body

use super::body::{BodyLine, LineBuf, MultilineBody};
use super::NntpIo;
use crate::error::{NntpError, Result};
use crate::yenc::{YencDecoder, YencHeader, YencState, YencStep};

/// Reader that yields the decoded bytes of a single-part yEnc body
///
/// The first body line must be `=ybegin`; decoding stops at `=yend`.
/// [`close`](Self::close) drains the rest of the article through its "."
/// terminator.
pub struct YencBody<'a, S: NntpIo> {
    body: MultilineBody<'a, S>,
    decoder: YencDecoder,
    pending: LineBuf,
    /// Set once the body violated the yEnc grammar; no more lines are read
    failed: Option<String>,
}

impl<'a, S: NntpIo> YencBody<'a, S> {
    pub(super) fn new(body: MultilineBody<'a, S>) -> Self {
        Self {
            body,
            decoder: YencDecoder::new(),
            pending: LineBuf::default(),
            failed: None,
        }
    }

    /// Header from the `=ybegin` line, once it has been read
    pub fn header(&self) -> Option<&YencHeader> {
        self.decoder.header()
    }

    /// Decoder progress
    pub fn state(&self) -> YencState {
        self.decoder.state()
    }

    /// Decoded bytes of the next non-empty data line
    ///
    /// Returns [`BodyLine::End`] after `=yend`.
    ///
    /// # Errors
    ///
    /// [`NntpError::Format`] when the body does not start with `=ybegin` or
    /// ends before `=yend`. The error repeats on every later call.
    pub async fn next_chunk(&mut self) -> Result<BodyLine> {
        if let Some(msg) = &self.failed {
            return Err(NntpError::Format(msg.clone()));
        }

        loop {
            if self.decoder.state() == YencState::Done {
                return Ok(BodyLine::End);
            }

            let mut line = match self.body.next_line().await? {
                BodyLine::More(line) => line,
                BodyLine::End => {
                    let msg = match self.decoder.state() {
                        YencState::AwaitingHeader => "expected =ybegin, got end of body",
                        _ => "body ended before =yend",
                    };
                    return Err(self.fail(msg.to_string()));
                }
            };

            match self.decoder.push_line(&mut line) {
                Ok(YencStep::Data) if !line.is_empty() => return Ok(BodyLine::More(line)),
                Ok(YencStep::Data | YencStep::Header) => {}
                Ok(YencStep::End) => return Ok(BodyLine::End),
                Err(NntpError::Format(msg)) => return Err(self.fail(msg)),
                Err(e) => return Err(e),
            }
        }
    }

    fn fail(&mut self, msg: String) -> NntpError {
        self.failed = Some(msg.clone());
        NntpError::Format(msg)
    }

    /// Read decoded bytes into `buf`; 0 after `=yend`
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_drained() {
            match self.next_chunk().await? {
                BodyLine::More(chunk) => self.pending.fill(chunk),
                BodyLine::End => return Ok(0),
            }
        }
        Ok(self.pending.copy_to(buf))
    }

    /// Read all remaining decoded bytes
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = self.pending.take();
        while let BodyLine::More(chunk) = self.next_chunk().await? {
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }

    /// Discard the rest of the article through its terminator
    pub async fn close(self) -> Result<()> {
        self.body.close().await
    }
}
