//! Error reporting for fetch failures.
//!
//! The fire-and-forget entry point has no return value, so this is the only
//! channel through which its failures become visible. Callers inject a
//! reporter; the default sends failures to the `tracing` subscriber.

use crate::fetch::FetchError;
use std::sync::Mutex;

/// Receives every failed fetch exactly once.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, url: &str, error: &FetchError);
}

/// Logs failures at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, url: &str, error: &FetchError) {
        tracing::error!(url, "{}", error);
    }
}

/// Keeps `"<url>: <error>"` lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(m) => m.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, url: &str, error: &FetchError) {
        let line = format!("{}: {}", url, error);
        match self.messages.lock() {
            Ok(mut m) => m.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}
