//! Filesystem utilities

use std::path::Path;

use log::warn;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check that a path exists and is a regular file, logging when it does not
///
/// Used before opening the dataset so a bad path is reported with the
/// path itself rather than as an opaque driver error.
pub fn is_readable_file(path: &str) -> bool {
    let path = Path::new(path);
    match path.metadata() {
        Ok(meta) if meta.is_file() => true,
        Ok(_) => {
            warn!("{} exists but is not a file", path.display());
            false
        }
        Err(e) => {
            warn!("cannot access {}: {}", path.display(), e);
            false
        }
    }
}
