//! Fetch-and-save: one GET, the whole body accumulated as UTF-8 text, then
//! written to a destination path in a single write.
//!
//! Two entry points share the pipeline. [`fetch_and_save`] returns a
//! [`SaveOutcome`] or [`FetchError`]. [`spawn_fetch_and_save`] runs it as a
//! background task and returns nothing; its failures only reach the
//! [`ErrorReporter`].

mod body;
mod error;
mod target;
mod transfer;

pub use body::{BodyBuffer, LimitExceeded};
pub use error::FetchError;
pub use target::parse_target;

use crate::checksum;
use crate::config::{FetchConfig, WriteErrorPolicy};
use crate::report::ErrorReporter;
use crate::storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Per-call knobs. The default is unbounded, HTTPS only, and reports write errors.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub max_body_bytes: Option<u64>,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub allow_plain_http: bool,
    pub on_write_error: WriteErrorPolicy,
}

impl From<&FetchConfig> for FetchOptions {
    fn from(cfg: &FetchConfig) -> Self {
        Self {
            max_body_bytes: cfg.max_body_bytes,
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            allow_plain_http: cfg.allow_plain_http,
            on_write_error: cfg.on_write_error,
        }
    }
}

/// What a successful call wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// HTTP status of the response. Not checked: error pages are saved too.
    pub status: u32,
    /// Number of chunks the transport delivered.
    pub chunks: usize,
    /// SHA-256 of the bytes written, lowercase hex.
    pub sha256: String,
}

impl SaveOutcome {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Download `url` and write its body, decoded as UTF-8, to `destination`.
///
/// Any existing file at `destination` is replaced. No file is written unless
/// the whole body arrived. Every error is passed to `reporter` before it is
/// returned.
pub async fn fetch_and_save(
    url: &str,
    destination: &Path,
    opts: &FetchOptions,
    reporter: &dyn ErrorReporter,
) -> Result<SaveOutcome, FetchError> {
    let result = run(url, destination, opts).await;
    if let Err(e) = &result {
        reporter.report(url, e);
    }
    result
}

/// Fire-and-forget form of [`fetch_and_save`]. Must be called from within a Tokio runtime.
///
/// Returns immediately. Completion is visible only as the file at
/// `destination`; failures go to `reporter`. With
/// [`WriteErrorPolicy::Fatal`], a failed write also exits the process.
pub fn spawn_fetch_and_save(
    url: impl Into<String>,
    destination: impl Into<PathBuf>,
    opts: FetchOptions,
    reporter: Arc<dyn ErrorReporter>,
) {
    let url = url.into();
    let destination = destination.into();
    tokio::spawn(async move {
        match fetch_and_save(&url, &destination, &opts, reporter.as_ref()).await {
            Ok(outcome) => {
                tracing::debug!(url = %url, bytes = outcome.bytes_written, "background fetch done");
            }
            Err(FetchError::Write { .. }) if opts.on_write_error == WriteErrorPolicy::Fatal => {
                tracing::error!(url = %url, "write failed and on_write_error = fatal; exiting");
                std::process::exit(1);
            }
            Err(_) => {}
        }
    });
}

async fn run(url: &str, destination: &Path, opts: &FetchOptions) -> Result<SaveOutcome, FetchError> {
    parse_target(url, opts.allow_plain_http)?;
    let url = url.to_string();
    let opts = opts.clone();
    let destination = destination.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let transfer = transfer::get(&url, &opts)?;
        save(&url, destination, transfer)
    })
    .await?
}

fn save(
    url: &str,
    destination: PathBuf,
    transfer: transfer::Transfer,
) -> Result<SaveOutcome, FetchError> {
    let status = transfer.status;
    let chunks = transfer.body.chunks();
    if !(200..300).contains(&status) {
        tracing::warn!(url, status, "non-success status, saving body anyway");
    }

    let text = transfer.body.into_text();
    let sha256 = checksum::sha256_bytes(text.as_bytes());
    let bytes_written = storage::write_text(&destination, &text)?;
    tracing::info!(
        "saved {} bytes from {} to {}",
        bytes_written,
        url,
        destination.display()
    );

    Ok(SaveOutcome {
        path: destination,
        bytes_written,
        status,
        chunks,
        sha256,
    })
}
