//! NNTP server configuration

/// NNTP server configuration
///
/// Contains everything needed to dial and authenticate against a news server.
///
/// # Example
///
/// ```
/// use nntp_stream::ServerConfig;
///
/// let config = ServerConfig::tls("news.example.com", "user", "pass");
/// assert_eq!(config.port, 563);
///
/// let config = ServerConfig {
///     host: "news.example.com".to_string(),
///     port: 119,
///     tls: false,
///     allow_insecure_tls: false,
///     username: String::new(),
///     password: String::new(),
/// };
/// assert!(!config.has_credentials());
/// ```
#[must_use]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Server hostname (e.g., "news.example.com")
    pub host: String,

    /// Server port (typically 119 for plain, 563 for TLS)
    pub port: u16,

    /// Wrap the TCP connection in TLS before reading the greeting
    #[cfg_attr(feature = "serde", serde(default = "default_tls"))]
    pub tls: bool,

    /// Allow insecure TLS connections (self-signed or expired certificates)
    ///
    /// **Security Warning:** Setting this to `true` disables certificate
    /// validation, making the connection vulnerable to man-in-the-middle
    /// attacks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_insecure_tls: bool,

    /// Username for AUTHINFO USER (empty when the server needs no login)
    #[cfg_attr(feature = "serde", serde(default))]
    pub username: String,

    /// Password for AUTHINFO PASS
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: String,
}

#[cfg(feature = "serde")]
fn default_tls() -> bool {
    true
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(
        host: impl Into<String>,
        port: u16,
        tls: bool,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            tls,
            allow_insecure_tls: false,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a configuration for a TLS connection on the standard secure port (563)
    pub fn tls(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(host, 563, true, username, password)
    }

    /// Create a configuration for a plain connection on the standard port (119)
    ///
    /// **Warning:** Plain connections transmit credentials in clear text.
    pub fn plain(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(host, 119, false, username, password)
    }

    /// Create a TLS configuration that accepts self-signed certificates
    ///
    /// **Security Warning:** certificate validation is disabled.
    pub fn tls_insecure(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut config = Self::tls(host, username, password);
        config.allow_insecure_tls = true;
        config
    }

    /// Whether a username was configured
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}
