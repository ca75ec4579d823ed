//! A full reader session over one connection
//!
//! Exercises the commands in the order a newsreader would use them and
//! checks the exact command stream the client produced.

use crate::common::{connect, crlf};
use chrono::{TimeZone, Utc};

const SERVER: &[&str] = &[
    "101 Capability list:",
    "VERSION 2",
    ".",
    "202 Extensions supported:",
    "HDR",
    "OVER",
    ".",
    "111 20100329034158",
    "215 Blah blah",
    "foo 7 3 y",
    "bar 000008 02 m",
    ".",
    "211 100 1 100 gmane.comp.lang.go.general",
    "223 1 <a@b.c> status",
    "223 2 <b@c.d> Article retrieved",
    "223 1 <a@b.c> Article retrieved",
    "220 1 <a@b.c> article",
    "Path: fake!not-for-mail",
    "From: Someone",
    "Newsgroups: gmane.comp.lang.go.general",
    "Subject: [go-nuts] What about base members?",
    "Message-ID: <a@b.c>",
    "",
    "Blah, blah.",
    "..A single leading .",
    "Fin.",
    ".",
    "220 2 <b@c.d> article",
    "Message-ID: <b@c.d>",
    "",
    "Body.",
    ".",
    "221 100 <c@d.e> head",
    "Path: fake!not-for-mail",
    "Message-ID: <c@d.e>",
    ".",
    "221 100 <c@d.e> head",
    "Path: fake!not-for-mail",
    "Message-ID: <c@d.e>",
    ".",
    "423 Bad article number",
    "423 Bad article number",
    "222 1 <a@b.c> body",
    "Blah, blah.",
    "..A single leading .",
    "Fin.",
    ".",
    "230 list of new articles by message-id follows",
    "<d@e.c>",
    ".",
    "231 New newsgroups follow",
    ".",
    "500 Not supported",
    "224 Overview information for 10-11 follows",
    "10\tSubject10\tAuthor <author@server>\tSat, 18 Oct 2003 18:00:00 +0030\t<d@e.f>\t\t1000\t9",
    "11\tSubject11\t\t18 Oct 2003 19:00:00 +0030\t<e@f.g>\t<d@e.f> <a@b.c>\t2000\t18\tExtra stuff",
    ".",
    "205 Bye!",
];

const CLIENT: &[&str] = &[
    "CAPABILITIES",
    "LIST EXTENSIONS",
    "DATE",
    "LIST",
    "GROUP gmane.comp.lang.go.general",
    "STAT",
    "NEXT",
    "LAST",
    "ARTICLE 1",
    "ARTICLE 2",
    "HEAD 100",
    "HEAD",
    "HEAD 0",
    "HEAD 101",
    "BODY 1",
    "NEWNEWS gmane.comp.lang.go.general 20100301 000000 GMT",
    "NEWGROUPS 20100301 000000 GMT",
    "XZVER 10-11",
    "OVER 10-11",
    "QUIT",
];

#[tokio::test]
async fn test_reader_session() {
    let (mut client, sent) = connect(crlf(SERVER)).await;

    client.capabilities().await.unwrap();
    assert_eq!(client.list_extensions().await.unwrap().join(" + "), "HDR + OVER");
    client.date().await.unwrap();
    client.list().await.unwrap();

    let group = client.group("gmane.comp.lang.go.general").await.unwrap();
    let (low, high) = (group.low, group.high);

    client.stat("").await.unwrap();
    client.next().await.unwrap();
    client.last().await.unwrap();

    let mut article = client.article(&low.to_string()).await.unwrap();
    let text = String::from_utf8(article.body.read_to_end().await.unwrap()).unwrap();
    assert!(text.ends_with("\n\nBlah, blah.\n.A single leading .\nFin.\n"));

    let mut article = client.article(&(low + 1).to_string()).await.unwrap();
    assert_eq!(
        article.body.read_to_end().await.unwrap(),
        b"Message-ID: <b@c.d>\n\nBody.\n"
    );

    // Headers left unread are drained before the next command
    client.head(&high.to_string()).await.unwrap();
    client.head("").await.unwrap();

    assert!(client.head(&(low - 1).to_string()).await.is_err());
    assert!(client.head(&(high + 1).to_string()).await.is_err());

    let mut body = client.body(&low.to_string()).await.unwrap();
    assert_eq!(
        body.body.read_to_end().await.unwrap(),
        b"Blah, blah.\n.A single leading .\nFin.\n"
    );

    let since = Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap();
    client.newnews("gmane.comp.lang.go.general", since).await.unwrap();
    client.newgroups(since).await.unwrap();

    let records = client.overview(10, 11).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].extra, vec!["Extra stuff"]);

    client.quit().await.unwrap();

    assert_eq!(sent.lines(), CLIENT);
    assert!(!client.is_broken());
}
