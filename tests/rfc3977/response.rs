//! RFC 3977 Section 3.2 - Status line format

use crate::common::{MockStream, connect, crlf};
use nntp_stream::commands::parse_response_line;
use nntp_stream::{NntpClient, NntpError};

#[test]
fn test_parse_status_lines() {
    assert_eq!(
        parse_response_line("211 6117 53009 59125 uk.politics.drugs").unwrap(),
        (211, "6117 53009 59125 uk.politics.drugs".to_string())
    );
    assert_eq!(parse_response_line("205").unwrap(), (205, String::new()));
    assert!(parse_response_line("20").is_err());
    assert!(parse_response_line("abc hello").is_err());
    assert!(parse_response_line("").is_err());
}

#[tokio::test]
async fn test_greeting_rejected() {
    let (stream, _) = MockStream::new(crlf(&["502 Permission denied"]));
    let result = NntpClient::from_stream(stream).await;
    assert!(matches!(result, Err(NntpError::Protocol { code: 502, .. })));
}

#[tokio::test]
async fn test_greeting_without_posting() {
    let (stream, _) = MockStream::new(crlf(&["201 read only"]));
    let client = NntpClient::from_stream(stream).await.unwrap();
    assert!(!client.is_broken());
}

#[tokio::test]
async fn test_garbage_status_breaks_connection() {
    let (mut client, _) = connect(b"HTTP/1.1 400 Bad Request\r\n".to_vec()).await;

    assert!(matches!(
        client.date().await,
        Err(NntpError::InvalidResponse(_))
    ));
    assert!(client.is_broken());
}

#[tokio::test]
async fn test_server_hangup() {
    let (mut client, _) = connect(Vec::new()).await;
    assert!(matches!(client.date().await, Err(NntpError::ConnectionClosed)));
    assert!(client.is_broken());
}

#[tokio::test]
async fn test_mode_reader() {
    let (mut client, sent) = connect(crlf(&[
        "200 Posting allowed",
        "201 Posting prohibited",
        "502 Reader mode unavailable",
    ]))
    .await;

    assert!(client.mode_reader().await.unwrap());
    assert!(!client.mode_reader().await.unwrap());
    assert!(matches!(
        client.mode_reader().await,
        Err(NntpError::Protocol { code: 502, .. })
    ));
    assert_eq!(sent.lines(), vec!["MODE READER"; 3]);
}

#[tokio::test]
async fn test_date_and_quit() {
    let (mut client, sent) = connect(crlf(&["111 20100329034158", "205 Bye!"])).await;

    let date = client.date().await.unwrap();
    assert_eq!(date.format("%Y-%m-%d %H:%M:%S").to_string(), "2010-03-29 03:41:58");
    client.quit().await.unwrap();
    assert_eq!(sent.lines(), vec!["DATE", "QUIT"]);
}
