//! CLI command handlers, one per file.

mod checksum;
mod get;

pub use checksum::run_checksum;
pub use get::run_get;
