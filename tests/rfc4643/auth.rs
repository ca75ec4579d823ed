//! AUTHINFO USER/PASS exchanges (RFC 4643 §2.3)

use std::sync::Arc;

use crate::common::{connect, crlf};
use nntp_stream::{NntpClient, NntpError, ServerConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_user_then_pass() {
    let (mut client, sent) = connect(crlf(&[
        "381 Password required",
        "281 Authentication accepted",
    ]))
    .await;

    assert!(!client.is_authenticated());
    client.authenticate_with("user", "secret").await.unwrap();
    assert!(client.is_authenticated());
    assert_eq!(sent.lines(), vec!["AUTHINFO USER user", "AUTHINFO PASS secret"]);
}

#[tokio::test]
async fn test_user_alone_accepted() {
    let (mut client, sent) = connect(crlf(&["281 Authentication accepted"])).await;

    client.authenticate_with("user", "unused").await.unwrap();
    assert!(client.is_authenticated());
    assert_eq!(sent.lines(), vec!["AUTHINFO USER user"]);
}

#[tokio::test]
async fn test_rejected_password() {
    let (mut client, _) = connect(crlf(&[
        "381 Password required",
        "481 Authentication failed",
        "111 20240101000000",
    ]))
    .await;

    match client.authenticate_with("user", "wrong").await {
        Err(NntpError::AuthFailed(msg)) => assert_eq!(msg, "Authentication failed"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!client.is_authenticated());
    assert!(!client.is_broken());

    // A rejected login leaves the session usable
    client.date().await.unwrap();
}

#[tokio::test]
async fn test_already_authenticated() {
    let (mut client, sent) = connect(crlf(&["281 Authentication accepted"])).await;
    client.authenticate_with("user", "pass").await.unwrap();

    assert!(matches!(
        client.authenticate_with("user", "pass").await,
        Err(NntpError::Protocol { code: 502, .. })
    ));
    assert_eq!(sent.lines().len(), 1);
}

#[tokio::test]
async fn test_without_configured_credentials() {
    let (mut client, sent) = connect(Vec::new()).await;

    assert!(matches!(
        client.authenticate().await,
        Err(NntpError::AuthFailed(_))
    ));
    assert!(sent.lines().is_empty());
}

/// Serve `replies` in order, one per received command line
async fn serve(
    listener: TcpListener,
    greeting: &'static str,
    replies: &'static [&'static str],
) -> Vec<String> {
    let (socket, _) = listener.accept().await.unwrap();
    let (read, mut write) = socket.into_split();
    let mut lines = BufReader::new(read).lines();
    let mut received = Vec::new();

    write.write_all(greeting.as_bytes()).await.unwrap();
    for reply in replies {
        let Some(line) = lines.next_line().await.unwrap() else {
            break;
        };
        received.push(line);
        write.write_all(reply.as_bytes()).await.unwrap();
    }
    received
}

#[tokio::test]
async fn test_authenticate_from_config_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(serve(
        listener,
        "200 loopback ready\r\n",
        &["381 more\r\n", "281 ok\r\n", "205 bye\r\n"],
    ));

    let config = ServerConfig::new("127.0.0.1", port, false, "alice", "hunter2");
    let mut client = NntpClient::connect(Arc::new(config)).await.unwrap();
    assert!(client.config().is_some());

    client.authenticate().await.unwrap();
    assert!(client.is_authenticated());
    client.quit().await.unwrap();

    assert_eq!(
        server.await.unwrap(),
        vec!["AUTHINFO USER alice", "AUTHINFO PASS hunter2", "QUIT"]
    );
}
