//! RFC 3977 Sections 6.2.1-6.2.3 - ARTICLE, HEAD and BODY

use crate::common::{connect, crlf};
use nntp_stream::{BodyLine, NntpError};

fn script() -> Vec<u8> {
    crlf(&[
        "211 100 1 100 gmane.comp.lang.go.general",
        "220 1 <a@b.c> article",
        "Path: fake!not-for-mail",
        "From: Someone",
        "Message-ID: <a@b.c>",
        "",
        "Blah, blah.",
        "..A single leading .",
        "Fin.",
        ".",
        "221 100 <c@d.e> head",
        "Path: fake!not-for-mail",
        "Message-ID: <c@d.e>",
        ".",
        "423 Bad article number",
        "430 No such article",
    ])
}

#[tokio::test]
async fn test_article_headers_and_body() {
    let (mut client, _) = connect(script()).await;
    client.group("gmane.comp.lang.go.general").await.unwrap();

    let mut article = client.article("1").await.unwrap();
    assert_eq!(article.number, 1);
    assert_eq!(article.message_id, "<a@b.c>");

    let text = article.body.read_to_end().await.unwrap();
    assert_eq!(
        String::from_utf8(text).unwrap(),
        "Path: fake!not-for-mail\nFrom: Someone\nMessage-ID: <a@b.c>\n\nBlah, blah.\n.A single leading .\nFin.\n"
    );
}

#[tokio::test]
async fn test_head_moves_pointer_and_unread_article_is_drained() {
    let (mut client, sent) = connect(script()).await;
    client.group("gmane.comp.lang.go.general").await.unwrap();

    // Read only the first line of the article, then move on
    {
        let mut article = client.article("1").await.unwrap();
        assert!(matches!(article.body.next_line().await.unwrap(), BodyLine::More(_)));
    }

    let mut head = client.head("100").await.unwrap();
    assert_eq!(head.message_id, "<c@d.e>");
    assert_eq!(
        head.body.lines().await.unwrap(),
        vec!["Path: fake!not-for-mail", "Message-ID: <c@d.e>"]
    );
    drop(head);
    assert_eq!(client.current_article(), Some(100));

    assert_eq!(
        sent.lines(),
        vec!["GROUP gmane.comp.lang.go.general", "ARTICLE 1", "HEAD 100"]
    );
}

#[tokio::test]
async fn test_missing_articles() {
    let (mut client, _) = connect(crlf(&[
        "423 Bad article number",
        "430 No such article",
        "111 20240101000000",
    ]))
    .await;

    let err = client.head("101").await.err().unwrap();
    assert!(matches!(err, NntpError::NoSuchArticle(ref id) if id == "101"));

    let err = client.body("<gone@x>").await.err().unwrap();
    assert!(matches!(err, NntpError::NoSuchArticle(ref id) if id == "<gone@x>"));

    // Failures carry no body: the next status line is read directly
    client.date().await.unwrap();
    assert!(!client.is_broken());
}

#[tokio::test]
async fn test_malformed_article_status_still_drains_body() {
    let (mut client, sent) = connect(crlf(&[
        "220 article follows",
        "Path: x",
        "",
        "body",
        ".",
        "223 5 <z@z> status",
    ]))
    .await;

    assert!(matches!(
        client.article("<z@z>").await.err().unwrap(),
        NntpError::InvalidResponse(_)
    ));
    assert!(!client.is_broken());

    // The unread article is consumed before STAT goes out
    let info = client.stat("5").await.unwrap();
    assert_eq!(info.number, 5);
    assert_eq!(info.message_id, "<z@z>");
    assert_eq!(sent.lines(), vec!["ARTICLE <z@z>", "STAT 5"]);
}

#[tokio::test]
async fn test_unexpected_success_code_breaks_connection() {
    let (mut client, _) = connect(crlf(&["220 1 <a@b.c> article", "Path: x", "."])).await;

    assert!(matches!(
        client.body("1").await.err().unwrap(),
        NntpError::InvalidResponse(_)
    ));
    assert!(client.is_broken());
}
