//! RFC 3977 Section 8.3 - OVER, with RFC 2980 XOVER as fallback
//!
//! The overview engine always starts with the compressed XZVER variant on a
//! fresh connection; these transcripts reject it so the clear-text tiers run.

use crate::common::{connect, crlf};
use chrono::{FixedOffset, TimeZone};
use nntp_stream::commands::parse_overview_line;
use nntp_stream::{NntpError, Support};

fn two_records() -> Vec<&'static str> {
    vec![
        "10\tSubject10\tAuthor <author@server>\tSat, 18 Oct 2003 18:00:00 +0030\t<d@e.f>\t\t1000\t9",
        "11\tSubject11\t\t18 Oct 2003 19:00:00 +0030\t<e@f.g>\t<d@e.f> <a@b.c>\t2000\t18\tExtra stuff",
    ]
}

// Record Parsing Tests

#[test]
fn test_parse_records() {
    let records: Vec<_> = two_records()
        .into_iter()
        .map(|line| parse_overview_line(line).unwrap())
        .collect();

    let zone = FixedOffset::east_opt(1800).unwrap();
    assert_eq!(records[0].number, 10);
    assert_eq!(records[0].subject, "Subject10");
    assert_eq!(records[0].from, "Author <author@server>");
    assert_eq!(
        records[0].date,
        Some(zone.with_ymd_and_hms(2003, 10, 18, 18, 0, 0).unwrap())
    );
    assert_eq!(records[0].message_id, "<d@e.f>");
    assert!(records[0].references.is_empty());
    assert_eq!((records[0].bytes, records[0].lines), (1000, 9));
    assert!(records[0].extra.is_empty());

    assert_eq!(records[1].from, "");
    assert_eq!(
        records[1].date,
        Some(zone.with_ymd_and_hms(2003, 10, 18, 19, 0, 0).unwrap())
    );
    assert_eq!(records[1].references, vec!["<d@e.f>", "<a@b.c>"]);
    assert_eq!((records[1].bytes, records[1].lines), (2000, 18));
    assert_eq!(records[1].extra, vec!["Extra stuff"]);
}

// Fallback Tests

#[tokio::test]
async fn test_over_after_rejected_xzver() {
    let mut script = vec!["500 Not supported", "224 Overview information for 10-11 follows"];
    script.extend(two_records());
    script.push(".");
    let (mut client, sent) = connect(crlf(&script)).await;

    let records = client.overview(10, 11).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].subject, "Subject11");

    assert_eq!(sent.lines(), vec!["XZVER 10-11", "OVER 10-11"]);
    assert_eq!(client.extensions().get("XZVER"), Support::Unsupported);
}

#[tokio::test]
async fn test_xover_after_rejected_over() {
    let (mut client, sent) = connect(crlf(&[
        "500 Not supported",
        "500 What?",
        "224 data follows",
        "7\tlegacy\tme\t\t<7@x>\t\t10\t1",
        ".",
    ]))
    .await;

    let records = client.overview(7, 7).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject, "legacy");
    assert_eq!(sent.lines(), vec!["XZVER 7-7", "OVER 7-7", "XOVER 7-7"]);
}

#[tokio::test]
async fn test_all_tiers_rejected() {
    let (mut client, sent) = connect(crlf(&[
        "500 Not supported",
        "500 What?",
        "412 No newsgroup selected",
    ]))
    .await;

    let err = client.overview(1, 5).await.unwrap_err();
    assert!(matches!(err, NntpError::Protocol { code: 412, .. }));
    assert_eq!(sent.lines(), vec!["XZVER 1-5", "OVER 1-5", "XOVER 1-5"]);
    assert!(!client.is_broken());
}

#[tokio::test]
async fn test_empty_overview() {
    let (mut client, _) = connect(crlf(&["500 Not supported", "224 none", "."])).await;
    assert!(client.overview(5, 4).await.unwrap().is_empty());
}

// Malformed Record Tests

#[tokio::test]
async fn test_malformed_number_fails_after_draining() {
    let (mut client, sent) = connect(crlf(&[
        "500 Not supported",
        "224 data follows",
        "1\tfine\t\t\t<1@x>\t\t1\t1",
        "x2\tbroken\t\t\t<2@x>\t\t1\t1",
        "3\tafter\t\t\t<3@x>\t\t1\t1",
        ".",
        "111 20240101000000",
    ]))
    .await;

    let err = client.overview(1, 3).await.unwrap_err();
    match err {
        NntpError::Format(msg) => assert!(msg.contains("x2")),
        other => panic!("unexpected error: {other:?}"),
    }

    // The whole body was consumed; the connection is still usable
    assert!(!client.is_broken());
    client.date().await.unwrap();
    assert_eq!(sent.lines(), vec!["XZVER 1-3", "OVER 1-3", "DATE"]);
}
