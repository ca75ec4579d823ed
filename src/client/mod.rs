//! NNTP client: line channel, body readers, overview engine and the
//! request/response glue around them

mod articles;
mod auth;
mod body;
mod connection;
mod group_ops;
mod io;
mod listing;
mod overview;
mod server;
mod state;
mod yenc;

pub use articles::Article;
pub use body::{BodyLine, CompressedBody, MultilineBody};
pub use yenc::YencBody;

use crate::capabilities::ExtensionCache;
use crate::config::ServerConfig;
use state::{ConnectionState, GroupContext, OpenBody};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::debug;

/// Byte stream an NNTP connection can run over
///
/// Blanket-implemented for anything that is `AsyncRead + AsyncWrite + Unpin +
/// Send`: TCP, TLS, or an in-memory duplex for tests.
pub trait NntpIo: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> NntpIo for T {}

/// Async NNTP client over a single persistent connection
///
/// Commands are strictly sequential. Body readers borrow the client mutably,
/// so at most one response body can be open at a time; a reader dropped
/// before its terminator is drained before the next command goes out.
///
/// # Example
///
/// ```no_run
/// use nntp_stream::{NntpClient, ServerConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServerConfig::tls("news.example.com", "user", "pass");
/// let mut client = NntpClient::connect(Arc::new(config)).await?;
/// client.authenticate().await?;
///
/// let info = client.group("alt.test").await?;
/// for record in client.overview(info.low, info.high).await? {
///     println!("{} {}", record.number, record.subject);
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient<S = Box<dyn NntpIo>> {
    /// Buffered stream (both reader and writer)
    stream: BufReader<S>,
    /// Connection state
    state: ConnectionState,
    /// Server configuration (absent for clients built from a raw stream)
    config: Option<Arc<ServerConfig>>,
    /// Observed support for optional commands on this connection
    extensions: ExtensionCache,
    /// Currently selected newsgroup
    group: Option<GroupContext>,
    /// Response body still on the wire
    open_body: Option<OpenBody>,
    /// Whether this connection is desynchronized and must be discarded
    is_broken: bool,
}

impl<S: NntpIo> NntpClient<S> {
    /// Check if this connection is broken and should be discarded
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Mark this connection as broken
    fn mark_broken(&mut self) {
        if !self.is_broken {
            debug!("Marking connection as broken");
        }
        self.is_broken = true;
    }

    /// Check if the client is currently authenticated
    pub fn is_authenticated(&self) -> bool {
        self.state == ConnectionState::Authenticated
    }

    /// Extension support observed so far on this connection
    pub fn extensions(&self) -> &ExtensionCache {
        &self.extensions
    }

    /// Server configuration this client was connected with
    pub fn config(&self) -> Option<&ServerConfig> {
        self.config.as_deref()
    }
}

impl<S> Drop for NntpClient<S> {
    fn drop(&mut self) {
        debug!("NntpClient dropped");
    }
}
