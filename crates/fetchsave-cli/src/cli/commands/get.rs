//! `fetchsave get <url> <dest>` – download and save.

use anyhow::Result;
use fetchsave_core::{fetch_and_save, FetchOptions, TracingReporter};
use std::path::Path;

pub async fn run_get(url: &str, dest: &Path, opts: &FetchOptions) -> Result<()> {
    let outcome = fetch_and_save(url, dest, opts, &TracingReporter).await?;
    println!(
        "saved {} bytes to {} (HTTP {})",
        outcome.bytes_written,
        outcome.path.display(),
        outcome.status
    );
    println!("sha256 {}", outcome.sha256);
    Ok(())
}
