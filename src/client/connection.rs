//! Connection establishment: TCP socket tuning, optional TLS and the
//! server greeting

use crate::capabilities::ExtensionCache;
use crate::config::ServerConfig;
use crate::error::{NntpError, Result};
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::{debug, warn};

use super::state::ConnectionState;
use super::{NntpClient, NntpIo};

/// TCP connection timeout in seconds
const TCP_CONNECT_TIMEOUT_SECS: u64 = 120;

/// TLS handshake timeout in seconds
const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 60;

/// Greeting timeout in seconds
const GREETING_TIMEOUT_SECS: u64 = 60;

/// BufReader capacity; overview and body downloads are large
const BUFREADER_CAPACITY: usize = 64 * 1024;

/// Requested kernel receive buffer (the OS may adjust it)
const RECV_BUFFER_SIZE: usize = 1024 * 1024;

/// Certificate verifier that accepts every certificate
///
/// Disables certificate validation entirely. Only for self-signed test
/// servers.
#[derive(Debug)]
pub(super) struct DangerousAcceptAnyCertificate;

impl ServerCertVerifier for DangerousAcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, tokio_rustls::rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

impl NntpClient {
    /// Connect to the NNTP server named in `config`
    ///
    /// Uses TLS when `config.tls` is set. Does not authenticate; call
    /// [`authenticate`](Self::authenticate) after connecting.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Io`] - address resolution or TCP connect fails
    /// - [`NntpError::Tls`] - TLS handshake fails
    /// - [`NntpError::Timeout`] - connect, handshake or greeting times out
    /// - [`NntpError::Protocol`] - server greets with a failure status
    pub async fn connect(config: Arc<ServerConfig>) -> Result<Self> {
        debug!("Connecting to NNTP server {}:{}", config.host, config.port);

        let tcp_stream = open_tcp(&config).await?;

        let stream: Box<dyn NntpIo> = if config.tls {
            Box::new(tls_handshake(&config, tcp_stream).await?)
        } else {
            Box::new(tcp_stream)
        };

        let mut client = Self::new(stream, Some(config));
        timeout(
            Duration::from_secs(GREETING_TIMEOUT_SECS),
            client.read_greeting(),
        )
        .await
        .map_err(|_| NntpError::Timeout)??;

        Ok(client)
    }
}

impl<S: NntpIo> NntpClient<S> {
    /// Run the protocol over an already-established stream
    ///
    /// Reads and checks the server greeting like [`NntpClient::connect`].
    pub async fn from_stream(stream: S) -> Result<Self> {
        let mut client = Self::new(stream, None);
        client.read_greeting().await?;
        Ok(client)
    }

    fn new(stream: S, config: Option<Arc<ServerConfig>>) -> Self {
        Self {
            stream: BufReader::with_capacity(BUFREADER_CAPACITY, stream),
            state: ConnectionState::Ready,
            config,
            extensions: ExtensionCache::new(),
            group: None,
            open_body: None,
            is_broken: false,
        }
    }

    async fn read_greeting(&mut self) -> Result<()> {
        let greeting = self.read_status().await?;
        debug!("Server greeting: {} {}", greeting.code, greeting.message);

        if !greeting.is_success() {
            return Err(NntpError::Protocol {
                code: greeting.code,
                message: greeting.message,
            });
        }
        Ok(())
    }
}

fn resolve(config: &ServerConfig) -> Result<SocketAddr> {
    (config.host.as_str(), config.port)
        .to_socket_addrs()
        .map_err(|e| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Failed to resolve address: {}", e),
            ))
        })?
        .next()
        .ok_or_else(|| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "No address resolved",
            ))
        })
}

/// Open a tuned TCP connection with a connect timeout
async fn open_tcp(config: &ServerConfig) -> Result<TcpStream> {
    use socket2::{Domain, Protocol, Socket, Type};

    let socket_addr = resolve(config)?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Request/response protocol: small commands must go out immediately
    socket.set_nodelay(true)?;

    if let Err(e) = socket.set_recv_buffer_size(RECV_BUFFER_SIZE) {
        warn!(
            "Failed to set receive buffer size to {} bytes: {}",
            RECV_BUFFER_SIZE, e
        );
    } else if let Ok(actual) = socket.recv_buffer_size() {
        debug!(
            "TCP receive buffer: requested {} bytes, actual {} bytes",
            RECV_BUFFER_SIZE, actual
        );
    }

    // socket2 connect is blocking; connect before switching to non-blocking
    let tcp_stream = timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        tokio::task::spawn_blocking(move || -> std::io::Result<std::net::TcpStream> {
            socket.connect(&socket_addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        }),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Io(std::io::Error::other(format!("Task join error: {}", e))))??;

    Ok(TcpStream::from_std(tcp_stream)?)
}

/// Build the rustls client configuration for `config`
fn tls_config(config: &ServerConfig) -> ClientConfig {
    use tokio_rustls::rustls::crypto::{CryptoProvider, ring};
    let _ = CryptoProvider::install_default(ring::default_provider());

    if config.allow_insecure_tls {
        warn!("TLS certificate validation disabled - connection vulnerable to MITM attacks");
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(DangerousAcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth()
    }
}

async fn tls_handshake(
    config: &ServerConfig,
    tcp_stream: TcpStream,
) -> Result<tokio_rustls::client::TlsStream<TcpStream>> {
    let connector = TlsConnector::from(Arc::new(tls_config(config)));
    let server_name = ServerName::try_from(config.host.as_str())
        .map_err(|e| NntpError::Tls(format!("Invalid domain: {}", e)))?
        .to_owned();

    timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, tcp_stream),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {}", e)))
}
