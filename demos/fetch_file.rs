//! Fetch every URL listed in a file, one per line.
//!
//! Usage: cargo run --example fetch_file -- urls.txt

use batchfetch::{BatchFetcher, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args().nth(1).unwrap_or_else(|| "input.txt".to_string());

    let pool_size: usize = std::env::var("BATCHFETCH_WORKERS")
        .ok()
        .and_then(|w| w.parse().ok())
        .unwrap_or(10);
    let max_attempts: u32 = std::env::var("BATCHFETCH_MAX_ATTEMPTS")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or(3);

    let config = Config {
        pool_size,
        retry: batchfetch::RetryConfig {
            max_attempts,
            ..Default::default()
        },
        ..Default::default()
    };

    println!("Fetching targets from {input} with {pool_size} workers");
    println!();

    let fetcher = BatchFetcher::new(config)?;
    fetcher.run_file(&input).await?;

    Ok(())
}
