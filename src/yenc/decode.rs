use crate::{NntpError, Result};

use super::params::parse_ybegin;
use super::types::{YencHeader, YencState, YencStep};

const ESCAPE: u8 = b'=';
const OFFSET: u8 = 42;
const ESCAPE_OFFSET: u8 = 64;

/// Line-at-a-time yEnc decoder
///
/// Feed it the lines of a single-part yEnc body (without line terminators)
/// in order. Escape state is carried from one line to the next, so an `=` at
/// the very end of a line escapes the first byte of the following line.
/// `=ypart` lines are not recognized and decode as ordinary data.
#[derive(Debug, Default)]
pub struct YencDecoder {
    state: YencState,
    escape_pending: bool,
    header: Option<YencHeader>,
}

impl YencDecoder {
    /// Create a decoder waiting for `=ybegin`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the `=ybegin`/data/`=yend` grammar
    pub fn state(&self) -> YencState {
        self.state
    }

    /// Header parsed from the `=ybegin` line, once seen
    pub fn header(&self) -> Option<&YencHeader> {
        self.header.as_ref()
    }

    /// Consume one line
    ///
    /// On [`YencStep::Data`] `line` has been decoded in place and holds the
    /// output bytes (possibly none). On the other steps its contents are
    /// unspecified.
    ///
    /// # Errors
    ///
    /// [`NntpError::Format`] when the first line is not a `=ybegin` header.
    pub fn push_line(&mut self, line: &mut Vec<u8>) -> Result<YencStep> {
        match self.state {
            YencState::AwaitingHeader => {
                if !line.starts_with(b"=ybegin") {
                    return Err(NntpError::Format(format!(
                        "expected =ybegin, got {:?}",
                        String::from_utf8_lossy(line)
                    )));
                }
                self.header = Some(parse_ybegin(&String::from_utf8_lossy(line)));
                self.state = YencState::Decoding;
                Ok(YencStep::Header)
            }
            YencState::Decoding if line.starts_with(b"=yend") => {
                self.state = YencState::Done;
                Ok(YencStep::End)
            }
            YencState::Decoding => {
                decode_in_place(line, &mut self.escape_pending);
                Ok(YencStep::Data)
            }
            YencState::Done => Ok(YencStep::End),
        }
    }
}

/// Decode one data line in place
///
/// A read index walks the input while a write index trails behind it; the
/// buffer is truncated to the write index at the end. Escape markers are
/// consumed, so the output is never longer than the input.
pub fn decode_in_place(buf: &mut Vec<u8>, escape_pending: &mut bool) {
    let mut write = 0;

    for read in 0..buf.len() {
        let byte = buf[read];
        if *escape_pending {
            buf[write] = byte.wrapping_sub(OFFSET).wrapping_sub(ESCAPE_OFFSET);
            write += 1;
            *escape_pending = false;
        } else if byte == ESCAPE {
            *escape_pending = true;
        } else {
            buf[write] = byte.wrapping_sub(OFFSET);
            write += 1;
        }
    }

    buf.truncate(write);
}

/// Decode a complete single-part yEnc block held in memory
///
/// Lines are split on LF with a trailing CR stripped. Lines after `=yend`
/// are ignored.
///
/// # Errors
///
/// [`NntpError::Format`] when the block does not start with `=ybegin` or has
/// no `=yend` trailer.
///
/// # Example
///
/// ```
/// # use nntp_stream::yenc::decode;
/// let encoded = b"=ybegin line=128 size=2 name=hi.txt\r\nr\x93\r\n=yend size=2\r\n";
/// assert_eq!(decode(encoded).unwrap(), b"Hi");
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = YencDecoder::new();
    let mut output = Vec::with_capacity(input.len());

    for raw in input.split(|&b| b == b'\n') {
        let mut line = raw.strip_suffix(b"\r").unwrap_or(raw).to_vec();
        if decoder.state() == YencState::AwaitingHeader && line.is_empty() {
            continue;
        }
        match decoder.push_line(&mut line)? {
            YencStep::Data => output.extend_from_slice(&line),
            YencStep::Header => {}
            YencStep::End => break,
        }
    }

    match decoder.state() {
        YencState::Done => Ok(output),
        YencState::AwaitingHeader => Err(NntpError::Format(
            "expected =ybegin, got end of input".to_string(),
        )),
        YencState::Decoding => Err(NntpError::Format("missing =yend trailer".to_string())),
    }
}
