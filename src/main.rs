//! mediascan CLI
//!
//! Fast first-pass classification of remote images and videos.
//!
//! # Usage
//!
//! ```bash
//! mediascan https://example.com/photo.jpg
//! mediascan --json https://a.example/x.png https://b.example/y.mp4
//! mediascan --config scan.json --log-json https://example.com/clip.webm
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mediascan::logging::{init_tracing, init_tracing_json};
use mediascan::{ScanConfig, ScanVerdict, Scanner};
use std::path::PathBuf;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "mediascan")]
#[command(version)]
#[command(about = "Classify remote media as safe, warning or danger without downloading it", long_about = None)]
struct Cli {
    /// URLs to scan
    #[arg(required = true)]
    urls: Vec<String>,

    /// JSON configuration file
    #[arg(long, short, env = "MEDIASCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Print each verdict as a JSON line
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn print_verdict(json: bool, verdict: &ScanVerdict) -> Result<()> {
    if json {
        println!("{}", verdict.to_json_string()?);
        return Ok(());
    }

    let signals: Vec<&str> = verdict
        .contributing_signals
        .iter()
        .map(|s| s.as_str())
        .collect();
    println!(
        "{:<8} {:>5.2} {:>5}ms [{}] {}",
        verdict.classification.to_string(),
        verdict.confidence,
        verdict.elapsed.as_millis(),
        signals.join(","),
        verdict.metadata.url
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        init_tracing_json();
    } else {
        init_tracing();
    }

    let config = match &cli.config {
        Some(path) => ScanConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ScanConfig::default(),
    };
    let scanner = Scanner::http(config).context("building scanner")?;

    // Scans are independent; run them all at once and print in input order.
    let mut tasks = JoinSet::new();
    for (index, url) in cli.urls.iter().cloned().enumerate() {
        let scanner = scanner.clone();
        tasks.spawn(async move { (index, scanner.scan(&url).await) });
    }

    let mut verdicts = Vec::with_capacity(cli.urls.len());
    while let Some(joined) = tasks.join_next().await {
        verdicts.push(joined.context("scan task failed")?);
    }
    verdicts.sort_by_key(|(index, _)| *index);

    for (_, verdict) in &verdicts {
        print_verdict(cli.json, verdict)?;
    }
    Ok(())
}
