//! NNTP error types

use thiserror::Error;

/// NNTP protocol, framing, decoding and connection errors
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error during secure connection
    #[error("TLS error: {0}")]
    Tls(String),

    /// Connection or handshake timeout
    #[error("Connection timeout")]
    Timeout,

    /// Status line could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered a command with a failure status
    #[error("NNTP error {code}: {message}")]
    Protocol {
        /// NNTP response code (e.g., 411, 430, 500)
        code: u16,
        /// Error message from server
        message: String,
    },

    /// The stream violated the expected framing, e.g. a compressed body was
    /// not followed by a lone "." line
    ///
    /// The connection is desynchronized and must not be reused.
    #[error("Framing error: {0}")]
    Framing(String),

    /// A body did not follow its fixed textual grammar
    #[error("Format error: {0}")]
    Format(String),

    /// A compressed payload failed integrity or format validation
    #[error("Decode error: {0}")]
    Decode(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// No such newsgroup
    #[error("No such newsgroup: {0}")]
    NoSuchGroup(String),

    /// No such article
    #[error("No such article: {0}")]
    NoSuchArticle(String),

    /// No newsgroup selected
    #[error("No newsgroup selected")]
    NoGroupSelected,

    /// Connection closed unexpectedly
    #[error("Connection closed")]
    ConnectionClosed,
}

impl NntpError {
    /// Whether this error leaves the connection stream at an unknown position
    ///
    /// After such an error the connection must be discarded.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            NntpError::Io(_)
                | NntpError::Timeout
                | NntpError::InvalidResponse(_)
                | NntpError::Framing(_)
                | NntpError::Decode(_)
                | NntpError::ConnectionClosed
        )
    }
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
