//! Single file copy operations.
//!
//! This module opens the source and destination, hands both to the chunk
//! loop and turns any failure into an [`Error`] naming the offending path.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, OnConflict};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::Instant;

use super::chunked::{CopyStats, Side, chunk_buffer, copy_chunks};
use super::utils::is_same_file;

/// Copy a single file chunk by chunk
///
/// The source is read `options.chunk_size` bytes at a time and each chunk is
/// written to the destination before the next read, so memory use is
/// bounded by the chunk size regardless of file size. An existing
/// destination is handled according to `options.on_conflict`; with the
/// default [`OnConflict::Overwrite`] it is truncated first, so no stale
/// bytes remain past the copied length.
///
/// Both files are closed when this function returns, on success and on
/// every error path.
///
/// # Arguments
///
/// * `src` - Source file path
/// * `dst` - Destination file path
/// * `options` - Copy options
///
/// # Returns
///
/// Returns `Ok(Some(stats))` if the file was copied, `Ok(None)` if the
/// destination existed and [`OnConflict::Skip`] was selected.
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is a directory or special file ([`Error::NotARegularFile`])
/// - Source or destination cannot be accessed ([`Error::PermissionDenied`])
/// - Destination's parent directory is missing ([`Error::DestinationParentMissing`])
/// - Destination is a directory ([`Error::IsADirectory`])
/// - Destination is the source itself ([`Error::SameFile`])
/// - Destination exists and `on_conflict` is [`OnConflict::Error`] ([`Error::AlreadyExists`])
/// - The chunk buffer cannot be allocated ([`Error::ChunkAllocation`])
/// - A read, write or sync fails ([`Error::Io`], [`Error::NoSpace`])
///
/// The chunk buffer never exceeds the source length plus one byte, so a huge
/// chunk size on a small file costs no more memory than the file itself.
///
/// No destination file is created or truncated when the source cannot be
/// opened or the buffer cannot be allocated. A
/// failure during the transfer may leave a partially written destination.
///
/// # Example
///
/// ```no_run
/// use lazycopy::{copy_file, ChunkSize, CopyOptions};
/// use std::path::Path;
///
/// let options = CopyOptions::default().with_chunk_size(ChunkSize::try_from(1_048_576_i64)?);
/// copy_file(Path::new("disk.img"), Path::new("backup.img"), &options)?;
/// # Ok::<(), lazycopy::Error>(())
/// ```
#[must_use = "returns None if the destination was skipped, check the result"]
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<Option<CopyStats>> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "copy_file",
        src = %src.display(),
        dst = %dst.display(),
        chunk_size = options.chunk_size.get()
    )
    .entered();

    let start = Instant::now();

    // Follows symlinks: the file behind a link is what gets read
    let src_meta = fs::metadata(src).map_err(|e| Error::source_access(src, e))?;
    if !src_meta.is_file() {
        return Err(Error::NotARegularFile(src.to_path_buf()));
    }

    match fs::metadata(dst) {
        Ok(dst_meta) => {
            if dst_meta.is_dir() {
                return Err(Error::IsADirectory(dst.to_path_buf()));
            }
            if is_same_file(src, &src_meta, dst, &dst_meta) {
                return Err(Error::SameFile {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                });
            }
            match options.on_conflict {
                OnConflict::Overwrite => {}
                OnConflict::Skip => {
                    #[cfg(feature = "tracing")]
                    tracing::info!("destination exists, skipping");
                    return Ok(None);
                }
                OnConflict::Error => return Err(Error::AlreadyExists(dst.to_path_buf())),
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Destination doesn't exist yet; a missing parent surfaces at create time
        }
        Err(e) => return Err(Error::destination_access(dst, e)),
    }

    // Source and buffer first: if either fails, the destination is never touched
    let mut reader = File::open(src).map_err(|e| Error::source_access(src, e))?;
    let mut buf = chunk_buffer(options.chunk_size, src_meta.len()).map_err(|source| {
        Error::ChunkAllocation {
            chunk_size: options.chunk_size.get(),
            source,
        }
    })?;
    let mut writer = File::create(dst).map_err(|e| Error::destination_access(dst, e))?;

    let mut stats = copy_chunks(&mut reader, &mut writer, &mut buf).map_err(|e| {
        let path = match e.side {
            Side::Read => src,
            Side::Write => dst,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), error = %e.source, "transfer failed");
        Error::io(path, e.source)
    })?;

    if options.fsync {
        writer.sync_all().map_err(|e| Error::io(dst, e))?;
    }

    stats.duration = start.elapsed();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        bytes = stats.bytes_copied,
        chunks = stats.chunks,
        slowest_write_us = u64::try_from(stats.slowest_write.as_micros()).unwrap_or(u64::MAX),
        "copy complete"
    );

    Ok(Some(stats))
}

// =============================================================================
// Tests
// =============================================================================
