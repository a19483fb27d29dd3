pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod report;
pub mod storage;

pub use fetch::{fetch_and_save, spawn_fetch_and_save, FetchError, FetchOptions, SaveOutcome};
pub use report::{ErrorReporter, MemoryReporter, TracingReporter};
