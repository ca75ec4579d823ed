use crate::{NntpError, Result};

/// Encode binary data as a single-part yEnc block
///
/// The output holds the `=ybegin` header, the data lines and a `=yend`
/// trailer, each terminated by CRLF. No checksum is written.
///
/// # Arguments
/// * `data` - Binary data to encode
/// * `filename` - Original filename
/// * `line_length` - Maximum encoded line length (typically 128, max 997)
///
/// # Example
/// ```
/// # use nntp_stream::yenc::{decode, encode};
/// let encoded = encode(b"Hello", "test.bin", 128).unwrap();
/// assert!(encoded.starts_with(b"=ybegin line=128 size=5 name=test.bin\r\n"));
/// assert_eq!(decode(&encoded).unwrap(), b"Hello");
/// ```
pub fn encode(data: &[u8], filename: &str, line_length: usize) -> Result<Vec<u8>> {
    if line_length == 0 || line_length > 997 {
        return Err(NntpError::Format(format!(
            "Invalid line length: {} (must be 1-997)",
            line_length
        )));
    }

    let mut output = Vec::with_capacity(data.len() + data.len() / 32 + 128);
    output.extend_from_slice(
        format!(
            "=ybegin line={} size={} name={}\r\n",
            line_length,
            data.len(),
            filename
        )
        .as_bytes(),
    );
    encode_data(data, line_length, &mut output);
    output.extend_from_slice(format!("=yend size={}\r\n", data.len()).as_bytes());

    Ok(output)
}

/// Encode data lines with escaping and line breaks
///
/// output = (input + 42) mod 256. Critical bytes become `=` followed by
/// (byte + 64); TAB, SPACE and `.` are also escaped at the start of a line,
/// TAB and SPACE at the end of one.
fn encode_data(data: &[u8], line_length: usize, output: &mut Vec<u8>) {
    let mut line_len = 0;

    for (idx, &byte) in data.iter().enumerate() {
        let encoded = byte.wrapping_add(42);
        let last_on_line = line_len + 1 >= line_length || idx + 1 == data.len();

        let needs_escape = is_critical_byte(encoded)
            || (line_len == 0 && matches!(encoded, b'\t' | b' ' | b'.'))
            || (last_on_line && matches!(encoded, b'\t' | b' '));

        let width = if needs_escape { 2 } else { 1 };
        if line_len > 0 && line_len + width > line_length {
            output.extend_from_slice(b"\r\n");
            line_len = 0;
        }

        if needs_escape {
            output.push(b'=');
            output.push(encoded.wrapping_add(64));
        } else {
            output.push(encoded);
        }
        line_len += width;
    }

    if line_len > 0 {
        output.extend_from_slice(b"\r\n");
    }
}

/// Check if a byte must always be escaped
fn is_critical_byte(byte: u8) -> bool {
    matches!(
        byte,
        0x00 |  // NUL
        0x0A |  // LF
        0x0D |  // CR
        0x3D // '='
    )
}
