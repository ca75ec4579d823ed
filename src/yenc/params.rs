use std::collections::HashMap;

use super::types::YencHeader;

/// Parse a `=ybegin` header line
///
/// Format: `=ybegin line=128 size=123456 name=file.bin [part=1 total=5]`
///
/// Unknown keys are ignored and unparsable values read as `None`. The caller
/// has already checked the `=ybegin` prefix.
pub(crate) fn parse_ybegin(line: &str) -> YencHeader {
    let params = parse_yenc_params(line.strip_prefix("=ybegin").unwrap_or(line));
    let number = |key: &str| params.get(key).and_then(|s| s.parse().ok());

    YencHeader {
        line: number("line").and_then(|n: u64| usize::try_from(n).ok()),
        size: number("size"),
        name: params.get("name").cloned(),
        part: number("part").and_then(|n: u64| u32::try_from(n).ok()),
        total: number("total").and_then(|n: u64| u32::try_from(n).ok()),
    }
}

/// Parse yEnc `key=value` parameters
///
/// `name` is always last and runs to the end of the line, spaces included.
fn parse_yenc_params(params: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    let mut rest = params.trim_start();

    while let Some((key, after)) = rest.split_once('=') {
        let key = key.trim();
        if key.is_empty() || key.contains(' ') {
            break;
        }

        if key == "name" {
            result.insert(key.to_string(), after.trim_end().to_string());
            break;
        }

        let (value, tail) = after.split_once(' ').unwrap_or((after, ""));
        result.insert(key.to_string(), value.to_string());
        rest = tail.trim_start();
    }

    result
}
