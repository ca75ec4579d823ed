//! RFC 3977 Section 5.2 - CAPABILITIES, plus RFC 2980 LIST EXTENSIONS

use crate::common::{connect, crlf};
use nntp_stream::{Capabilities, NntpError};

#[test]
fn test_parse_capabilities() {
    let lines: Vec<String> = ["VERSION 2", "READER", "OVER MSGID", "", "xzver"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let caps = Capabilities::parse(&lines);

    assert!(caps.has("VERSION"));
    assert!(caps.has("reader"));
    assert!(caps.has("XZVER"));
    assert!(caps.has_arg("OVER", "msgid"));
    assert!(!caps.has("HDR"));
    assert_eq!(caps.get_args("VERSION").unwrap(), &vec!["2".to_string()]);
}

#[tokio::test]
async fn test_capabilities_command() {
    let (mut client, sent) =
        connect(crlf(&["101 Capability list:", "VERSION 2", "READER", "."])).await;

    let caps = client.capabilities().await.unwrap();
    assert!(caps.has("VERSION"));
    assert!(caps.has("READER"));
    assert_eq!(sent.lines(), vec!["CAPABILITIES"]);
}

#[tokio::test]
async fn test_capabilities_unsupported() {
    let (mut client, _) = connect(crlf(&["500 What?"])).await;
    assert!(matches!(
        client.capabilities().await,
        Err(NntpError::Protocol { code: 500, .. })
    ));
}

#[tokio::test]
async fn test_list_extensions() {
    let (mut client, sent) =
        connect(crlf(&["202 Extensions supported:", "HDR", "OVER", "."])).await;

    let exts = client.list_extensions().await.unwrap();
    assert_eq!(exts, vec!["HDR", "OVER"]);
    assert_eq!(sent.lines(), vec!["LIST EXTENSIONS"]);
}
