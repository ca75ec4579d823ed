//! Server capabilities (RFC 3977 Section 5.2) and the per-connection
//! extension cache
//!
//! [`Capabilities`] holds what the server advertises through CAPABILITIES.
//! [`ExtensionCache`] holds what the client has *observed*: whether an optional
//! command variant was accepted or rejected on this connection. The cache lives
//! exactly as long as the connection that owns it.

use std::collections::HashMap;

/// Represents the capabilities advertised by an NNTP server
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Map of capability name to its arguments
    /// Example: "OVER" -> ["MSGID"]
    capabilities: HashMap<String, Vec<String>>,
}

impl Capabilities {
    /// Create an empty Capabilities instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse capabilities from NNTP response lines
    ///
    /// # Format
    /// Each line is: `CAPABILITY [arg1 arg2 ...]`
    ///
    /// ```text
    /// VERSION 2
    /// READER
    /// OVER MSGID
    /// ```
    pub fn parse(lines: &[String]) -> Self {
        let mut capabilities = HashMap::new();

        for line in lines {
            let mut parts = line.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let args = parts.map(str::to_string).collect();
            capabilities.insert(name.to_uppercase(), args);
        }

        Self { capabilities }
    }

    /// Check if a capability is advertised
    #[must_use]
    pub fn has(&self, capability: &str) -> bool {
        self.capabilities.contains_key(&capability.to_uppercase())
    }

    /// Get arguments for a capability
    #[must_use]
    pub fn get_args(&self, capability: &str) -> Option<&Vec<String>> {
        self.capabilities.get(&capability.to_uppercase())
    }

    /// Get all capability names
    pub fn list(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }

    /// Check if the server advertises a capability with a specific argument
    pub fn has_arg(&self, capability: &str, arg: &str) -> bool {
        self.get_args(capability)
            .is_some_and(|args| args.iter().any(|a| a.eq_ignore_ascii_case(arg)))
    }
}

/// Observed support for an optional command on the current connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Support {
    /// Not tried yet
    #[default]
    Unknown,
    /// The server accepted the command at least once
    Supported,
    /// The server rejected the command; do not send it again
    Unsupported,
}

/// Connection-scoped memory of optional command outcomes
///
/// Keys are command keywords (case-insensitive), e.g. `XZVER`.
#[derive(Debug, Clone, Default)]
pub struct ExtensionCache {
    entries: HashMap<String, Support>,
}

impl ExtensionCache {
    /// Create an empty cache (every extension `Unknown`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the recorded support for a command keyword
    pub fn get(&self, keyword: &str) -> Support {
        self.entries
            .get(&keyword.to_ascii_uppercase())
            .copied()
            .unwrap_or_default()
    }

    /// Record an observed outcome
    pub fn record(&mut self, keyword: &str, support: Support) {
        self.entries.insert(keyword.to_ascii_uppercase(), support);
    }

    /// Whether the keyword has been rejected on this connection
    pub fn is_unsupported(&self, keyword: &str) -> bool {
        self.get(keyword) == Support::Unsupported
    }
}
