//! Error type for a single fetch-and-save call.

use std::path::PathBuf;
use std::time::Duration;

/// Why a fetch-and-save call did not produce a file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL parsed but its scheme is not allowed (only `https`, plus `http` when enabled).
    #[error("protocol \"{0}:\" not supported")]
    UnsupportedScheme(String),
    /// Curl reported a DNS, TLS, connection or stream failure.
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The configured transfer timeout elapsed.
    #[error("transfer timed out after {0:?}")]
    TimedOut(Duration),
    /// The body grew past the configured limit; the transfer was aborted.
    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: u64 },
    /// Writing the body to disk failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The blocking transfer worker panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// True for failures before the body was fully received. These never write a file.
    pub fn is_network(&self) -> bool {
        !matches!(self, FetchError::Write { .. } | FetchError::Task(_))
    }

    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        FetchError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
