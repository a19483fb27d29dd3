//! Writes a downloaded body to its destination.
//!
//! Each call writes its own temp file next to the destination and renames it
//! into place once synced. Readers see either the old file or a whole new
//! one, and overlapping calls on one path each replace it whole. The temp
//! file is removed on every failure path.

use crate::fetch::FetchError;
use std::io::Write;
use std::path::Path;

/// Suffix of in-flight temp files (`.<name>.<random>.part`).
pub const TEMP_SUFFIX: &str = ".part";

fn temp_dir_for(destination: &Path) -> &Path {
    match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn temp_prefix(destination: &Path) -> String {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(".{}.", name)
}

/// Replace the contents of `destination` with `text`. Returns the number of bytes written.
///
/// Does not create parent directories; a missing parent is a `Write` error.
pub fn write_text(destination: &Path, text: &str) -> Result<u64, FetchError> {
    let mut tmp = tempfile::Builder::new()
        .prefix(&temp_prefix(destination))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(temp_dir_for(destination))
        .map_err(|e| FetchError::write(destination, e))?;

    // Dropping `tmp` on any early return deletes it.
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| FetchError::write(destination, e))?;

    tmp.persist(destination)
        .map_err(|e| FetchError::write(destination, e.error))?;
    tracing::debug!(path = %destination.display(), bytes = text.len(), "body written");

    Ok(text.len() as u64)
}
