//! XZHDR - header listings with the HDR / XHDR fallback

use crate::common::{connect, crlf, zlib};
use nntp_stream::{NntpError, Support};

#[tokio::test]
async fn test_compressed_headers() {
    let mut script = b"221 Subject fields follow (compressed)\r\n".to_vec();
    script.extend(zlib(b"1 First subject\r\n2 Second subject\r\n3\r\n"));
    script.extend(b".\r\n");
    let (mut client, sent) = connect(script).await;

    let entries = client.headers("Subject", 1, 3).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].number, 1);
    assert_eq!(entries[0].value, "First subject");
    assert_eq!(entries[2].value, "");
    assert_eq!(client.extensions().get("XZHDR"), Support::Supported);
    assert_eq!(sent.lines(), vec!["XZHDR Subject 1-3"]);
}

#[tokio::test]
async fn test_falls_back_to_hdr_then_remembers() {
    let (mut client, sent) = connect(crlf(&[
        "500 Unknown command",
        "225 Headers follow",
        "3000 I am just a test article",
        "no number here",
        ".",
        "225 Headers follow",
        "3001 Another",
        ".",
    ]))
    .await;

    let entries = client.headers("Subject", 3000, 3000).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].value, "I am just a test article");

    let entries = client.headers("Subject", 3001, 3001).await.unwrap();
    assert_eq!(entries[0].number, 3001);

    assert_eq!(
        sent.lines(),
        vec!["XZHDR Subject 3000-3000", "HDR Subject 3000-3000", "HDR Subject 3001-3001"]
    );
    assert_eq!(client.extensions().get("XZHDR"), Support::Unsupported);
    // Overview support is tracked separately
    assert_eq!(client.extensions().get("XZVER"), Support::Unknown);
}

#[tokio::test]
async fn test_falls_back_to_xhdr() {
    let (mut client, sent) = connect(crlf(&[
        "500 Unknown command",
        "500 Unknown command",
        "221 Header follows",
        "7 someone@example.com",
        ".",
    ]))
    .await;

    let entries = client.headers("From", 7, 7).await.unwrap();
    assert_eq!(entries[0].value, "someone@example.com");
    assert_eq!(
        sent.lines(),
        vec!["XZHDR From 7-7", "HDR From 7-7", "XHDR From 7-7"]
    );
}

#[tokio::test]
async fn test_all_tiers_rejected() {
    let (mut client, _) = connect(crlf(&[
        "500 Unknown command",
        "412 No newsgroup selected",
        "412 No newsgroup selected",
    ]))
    .await;

    assert!(matches!(
        client.headers("Subject", 1, 2).await.unwrap_err(),
        NntpError::Protocol { code: 412, .. }
    ));
}
