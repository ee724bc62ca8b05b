//! Crash-safe file replacement shared by the config, photo and image stores.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `content` to a temp file next to `path`, then renames it over `path`.
///
/// Readers see either the old file or the new one, never a partial write.
///
/// # Errors
/// Returns an I/O error if `path` has no parent directory or the write or rename fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::other(format!("{} has no parent", path.display())))?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
