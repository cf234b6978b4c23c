//! Fetches a URL and prints its extracted feature vector, the Rust
//! counterpart of `feature_extraction_cli.py`: a small tool for
//! interactively evaluating the extractor against a live page.

use clap::Parser;

#[derive(Parser)]
#[command(about = "Extract and print features from a target page")]
struct Args {
    /// URL to fetch and extract features from.
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let body = reqwest::get(&args.url).await?.bytes().await?;
    let features = discover_features::extract(&body);

    let json = serde_json::to_string_pretty(&features.into_inner())?;
    println!("{json}");

    Ok(())
}
