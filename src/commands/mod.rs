//! NNTP command builders and response parsers
//!
//! Builders return the bare command text; the connection's line channel adds
//! the CRLF terminator when writing.

pub mod article;
pub mod group;
pub mod hdr;
pub mod list;
pub mod over;
pub mod response;

pub use article::*;
pub use group::*;
pub use hdr::*;
pub use list::*;
pub use over::*;
pub use response::*;

/// Build AUTHINFO USER command
pub fn authinfo_user(username: &str) -> String {
    format!("AUTHINFO USER {}", username)
}

/// Build AUTHINFO PASS command
pub fn authinfo_pass(password: &str) -> String {
    format!("AUTHINFO PASS {}", password)
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT"
}

/// Build CAPABILITIES command (RFC 3977 §5.2)
pub fn capabilities() -> &'static str {
    "CAPABILITIES"
}

/// Build LIST EXTENSIONS command (RFC 2980 predecessor of CAPABILITIES)
pub fn list_extensions() -> &'static str {
    "LIST EXTENSIONS"
}

/// Build DATE command (RFC 3977 §7.1)
///
/// Response: 111 yyyymmddhhmmss
pub fn date() -> &'static str {
    "DATE"
}

/// Build MODE READER command (RFC 3977 §5.3)
pub fn mode_reader() -> &'static str {
    "MODE READER"
}

/// Format an inclusive article range argument
pub fn range(lo: u64, hi: u64) -> String {
    format!("{}-{}", lo, hi)
}
