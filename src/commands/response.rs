//! Status line parsing

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Parse NNTP status line into code and message
pub fn parse_response_line(line: &str) -> Result<(u16, String)> {
    // Strip UTF-8 BOM if present (some broken servers/proxies add it)
    let line = line.trim_start_matches('\u{FEFF}');

    let bytes = line.as_bytes();
    if bytes.len() < 3
        || !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[2].is_ascii_digit()
    {
        return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
    }

    // "99999" must not parse as "999" with message "99"
    if bytes.len() > 3 && bytes[3].is_ascii_digit() {
        return Err(NntpError::InvalidResponse(line.chars().take(100).collect()));
    }

    let code = line[0..3]
        .parse::<u16>()
        .map_err(|_| NntpError::InvalidResponse(line.chars().take(100).collect()))?;

    let message = match bytes.get(3) {
        Some(b' ') => line[4..].to_string(),
        Some(_) => line[3..].to_string(),
        None => String::new(),
    };

    Ok((code, message))
}

/// Parse a status line into a response without body
pub fn parse_single_response(line: &str) -> Result<NntpResponse> {
    let (code, message) = parse_response_line(line)?;

    Ok(NntpResponse {
        code,
        message,
        lines: vec![],
    })
}

/// Turn a failure status into the matching error
pub fn status_error(response: NntpResponse) -> NntpError {
    NntpError::Protocol {
        code: response.code,
        message: response.message,
    }
}
