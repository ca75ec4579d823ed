//! NNTP authentication (AUTHINFO USER/PASS, RFC 4643)

use super::state::ConnectionState;
use super::{NntpClient, NntpIo};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl<S: NntpIo> NntpClient<S> {
    /// Authenticate with the credentials from the client configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_stream::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ServerConfig::tls("news.example.com", "user", "pass");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    /// client.authenticate().await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`NntpError::AuthFailed`] - No credentials configured, or the server
    ///   rejected them
    /// - [`NntpError::Protocol`] - Already authenticated
    pub async fn authenticate(&mut self) -> Result<()> {
        let Some(config) = self.config.clone().filter(|c| c.has_credentials()) else {
            return Err(NntpError::AuthFailed(
                "no credentials configured".to_string(),
            ));
        };
        self.authenticate_with(&config.username, &config.password)
            .await
    }

    /// Authenticate with explicit credentials (AUTHINFO USER/PASS)
    ///
    /// A server may accept the user alone (281); otherwise it asks for the
    /// password (381).
    pub async fn authenticate_with(&mut self, username: &str, password: &str) -> Result<()> {
        debug!("Authenticating as {}", username);

        if self.state == ConnectionState::Authenticated {
            return Err(NntpError::Protocol {
                code: codes::ACCESS_DENIED,
                message: "Already authenticated".to_string(),
            });
        }

        self.state = ConnectionState::InProgress;
        let mut response = self.command(&commands::authinfo_user(username)).await?;

        if response.code == codes::AUTH_CONTINUE {
            response = self.command(&commands::authinfo_pass(password)).await?;
        }

        if response.code != codes::AUTH_ACCEPTED {
            self.state = ConnectionState::Ready;
            return Err(NntpError::AuthFailed(response.message));
        }

        self.state = ConnectionState::Authenticated;
        debug!("Authentication successful");
        Ok(())
    }
}
