#![doc = include_str!("../README.md")]

mod capabilities;
mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
mod date;
mod error;
mod response;
/// yEnc decoding for Usenet binary bodies
pub mod yenc;

pub use capabilities::{Capabilities, ExtensionCache, Support};
pub use client::{
    Article, BodyLine, CompressedBody, MultilineBody, NntpClient, NntpIo, YencBody,
};
pub use commands::{ActiveGroup, ArticleInfo, GroupInfo, HdrEntry, OverviewRecord};
pub use config::ServerConfig;
pub use date::parse_news_date;
pub use error::{NntpError, Result};
pub use response::{NntpResponse, codes};
pub use yenc::{YencDecoder, YencHeader, YencState};
