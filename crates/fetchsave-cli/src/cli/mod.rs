//! CLI for fetchsave.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fetchsave_core::config;
use fetchsave_core::FetchOptions;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_checksum, run_get};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fetchsave")]
#[command(about = "Download a URL over HTTPS and save the body as text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download URL and write its body to DEST, replacing any existing file.
    Get {
        /// HTTPS URL to download.
        url: String,
        /// Destination file path. The parent directory must exist.
        dest: PathBuf,
        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Per-run overrides for values from config.toml.
#[derive(Debug, Default, clap::Args)]
pub struct LimitArgs {
    /// Abort if the whole transfer takes longer than SECS.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Abort if connecting takes longer than SECS.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,
    /// Abort if the body grows past N bytes.
    #[arg(long, value_name = "N")]
    pub max_bytes: Option<u64>,
    /// Accept plain http:// URLs.
    #[arg(long)]
    pub allow_http: bool,
}

impl LimitArgs {
    /// Apply flags on top of options loaded from config.
    pub fn apply(&self, mut opts: FetchOptions) -> FetchOptions {
        if let Some(secs) = self.timeout {
            opts.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout {
            opts.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(n) = self.max_bytes {
            opts.max_body_bytes = Some(n);
        }
        if self.allow_http {
            opts.allow_plain_http = true;
        }
        opts
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get { url, dest, limits } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = limits.apply(FetchOptions::from(&cfg));
                run_get(&url, &dest, &opts).await?;
            }
            CliCommand::Checksum { path } => run_checksum(&path).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
