//! Utility functions for file copy operations.

use std::fs::Metadata;
use std::path::Path;

// =============================================================================
// File identity
// =============================================================================

/// Check whether two paths name the same underlying file.
///
/// On Unix this compares device and inode, so hard links and symlinks to
/// the source are caught. Elsewhere it falls back to comparing canonical
/// paths.
#[cfg(unix)]
pub(crate) fn is_same_file(
    _src: &Path,
    src_meta: &Metadata,
    _dst: &Path,
    dst_meta: &Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino()
}

#[cfg(not(unix))]
pub(crate) fn is_same_file(
    src: &Path,
    _src_meta: &Metadata,
    dst: &Path,
    _dst_meta: &Metadata,
) -> bool {
    match (std::fs::canonicalize(src), std::fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
