//! Blocking single-stream GET with libcurl.

use super::body::{BodyBuffer, LimitExceeded};
use super::{FetchError, FetchOptions};
use std::time::Duration;

/// A finished transfer: status line code and the whole body.
#[derive(Debug)]
pub struct Transfer {
    pub status: u32,
    pub body: BodyBuffer,
}

/// Runs one GET against `url`, appending each received chunk to a [`BodyBuffer`].
/// `url` goes to curl exactly as the caller wrote it.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn get(url: &str, opts: &FetchOptions) -> Result<Transfer, FetchError> {
    let mut body = BodyBuffer::new(opts.max_body_bytes);
    let mut overflow: Option<LimitExceeded> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    // 3xx bodies are saved as-is.
    easy.follow_location(false)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    tracing::debug!(url, "GET");

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match body.push(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                overflow = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        if let Some(LimitExceeded { limit }) = overflow {
            return Err(FetchError::BodyTooLarge { limit });
        }
        if e.is_operation_timedout() {
            let connected = connection_ready(&mut easy, url);
            if let Some(d) = elapsed_limit(opts, connected) {
                return Err(FetchError::TimedOut(d));
            }
        }
        return Err(FetchError::Transport(e));
    }

    let status = easy.response_code()?;
    tracing::debug!(
        url,
        status,
        bytes = body.len(),
        chunks = body.chunks(),
        "transfer finished"
    );
    Ok(Transfer { status, body })
}

/// Whether connection setup (TCP, plus TLS for https) finished before the failure.
fn connection_ready(easy: &mut curl::easy::Easy, url: &str) -> bool {
    let tcp = easy.connect_time().map(|d| !d.is_zero()).unwrap_or(false);
    if !url.get(..6).is_some_and(|s| s.eq_ignore_ascii_case("https:")) {
        return tcp;
    }
    tcp && easy.appconnect_time().map(|d| !d.is_zero()).unwrap_or(false)
}

/// The configured limit that a curl timeout corresponds to. Before the
/// connection is ready the connect timeout is the tighter bound when set.
fn elapsed_limit(opts: &FetchOptions, connected: bool) -> Option<Duration> {
    if connected {
        opts.timeout
    } else {
        match (opts.connect_timeout, opts.timeout) {
            (Some(c), Some(t)) => Some(c.min(t)),
            (c, t) => c.or(t),
        }
    }
}
