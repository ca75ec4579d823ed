//! Connection state types for NNTP client

use flate2::Decompress;

use crate::commands::GroupInfo;

/// NNTP connection state tracking authentication progress
///
/// Tracks the authentication state of an NNTP connection according to RFC 4643.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ConnectionState {
    /// Connected and ready for commands (not authenticated)
    Ready,
    /// AUTHINFO USER sent, waiting for the PASS exchange to finish
    InProgress,
    /// Successfully authenticated
    Authenticated,
    /// QUIT acknowledged
    Closed,
}

/// Selected newsgroup plus the current article pointer
#[derive(Debug, Clone)]
pub(super) struct GroupContext {
    pub(super) info: GroupInfo,
    /// `None` when the group is empty or navigation has not landed anywhere
    pub(super) current: Option<u64>,
}

/// The body currently being received on the stream, if any
///
/// While this is set the next bytes on the wire belong to a response body,
/// so no command may be written until it has been consumed.
pub(super) enum OpenBody {
    /// Dot-terminated clear-text body
    Multiline,
    /// zlib stream followed by a clear-text "." line
    Compressed(Box<Inflate>),
}

/// Streaming inflater state for a compressed body
pub(super) struct Inflate {
    pub(super) decompress: Decompress,
    /// zlib stream end (trailer included) has been consumed
    pub(super) finished: bool,
    /// Decompressed bytes not yet handed out
    pub(super) pending: Vec<u8>,
    pub(super) pos: usize,
    /// A decompressed "." line ended the content
    pub(super) content_done: bool,
}

impl Inflate {
    pub(super) fn new() -> Self {
        Self {
            decompress: Decompress::new(true),
            finished: false,
            pending: Vec::new(),
            pos: 0,
            content_done: false,
        }
    }

    pub(super) fn unread(&self) -> &[u8] {
        &self.pending[self.pos..]
    }
}
