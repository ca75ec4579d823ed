//! Basic NNTP client example
//!
//! Run with: cargo run --example basic

use nntp_stream::{NntpClient, ServerConfig, Support};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (RUST_LOG=nntp_stream=debug for protocol traces)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Replace with your actual server credentials
    let config = ServerConfig {
        host: std::env::var("NNTP_HOST").unwrap_or_else(|_| "news.example.com".to_string()),
        port: std::env::var("NNTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(563),
        tls: true,
        allow_insecure_tls: false,
        username: std::env::var("NNTP_USER").unwrap_or_else(|_| "user".to_string()),
        password: std::env::var("NNTP_PASS").unwrap_or_else(|_| "pass".to_string()),
    };

    println!("Connecting to {}:{}...", config.host, config.port);
    let mut client = NntpClient::connect(Arc::new(config)).await?;
    println!("Connected!");

    client.authenticate().await?;
    println!("Authenticated!");

    let group = std::env::var("NNTP_GROUP").unwrap_or_else(|_| "alt.test".to_string());
    let info = client.group(&group).await?;
    println!(
        "Selected group '{}': {} articles ({}-{})",
        info.name, info.count, info.low, info.high
    );

    if info.count > 0 {
        let start = info.high.saturating_sub(10).max(info.low);
        println!("\nFetching overview {}-{}...", start, info.high);

        let records = client.overview(start, info.high).await?;
        let compressed = client.extensions().get("XZVER") == Support::Supported;
        println!(
            "Got {} records ({}):\n",
            records.len(),
            if compressed { "XZVER" } else { "OVER/XOVER" }
        );

        for record in records.iter().take(5) {
            println!(
                "  #{}: {} (by {}, {} bytes)",
                record.number, record.subject, record.from, record.bytes
            );
        }
        if records.len() > 5 {
            println!("  ... and {} more", records.len() - 5);
        }

        // Peek at the newest body; closing drains the rest
        if let Some(record) = records.last() {
            let mut article = client.body(&record.message_id).await?;
            let lines = article.body.lines().await?;
            println!("\nNewest article has {} body lines", lines.len());
            article.close().await?;
        }
    }

    client.quit().await?;
    println!("\nConnection closed.");

    Ok(())
}
