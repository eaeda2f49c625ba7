//! The chunk-by-chunk transfer loop.
//!
//! [`copy_chunks`] works on any [`Read`]/[`Write`] pair so the file layer
//! only has to deal with opening handles and attaching paths to errors.

use crate::options::ChunkSize;
use std::collections::TryReserveError;
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

/// Statistics from a completed copy.
///
/// # Example
///
/// ```no_run
/// use lazycopy::{copy_file, CopyOptions};
/// use std::path::Path;
///
/// if let Some(stats) = copy_file(Path::new("in.bin"), Path::new("out.bin"), &CopyOptions::default())? {
///     println!("Copied {} bytes in {} chunks", stats.bytes_copied, stats.chunks);
/// }
/// # Ok::<(), lazycopy::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of non-empty chunks read and written
    pub chunks: u64,
    /// Longest time spent writing a single chunk
    pub slowest_write: Duration,
    /// Duration of the copy operation
    pub duration: Duration,
}

/// Which half of the transfer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Read,
    Write,
}

/// A transfer failure, tagged with the side it happened on.
#[derive(Debug)]
pub(crate) struct TransferError {
    pub side: Side,
    pub source: io::Error,
}

impl TransferError {
    fn read(source: io::Error) -> Self {
        Self {
            side: Side::Read,
            source,
        }
    }

    fn write(source: io::Error) -> Self {
        Self {
            side: Side::Write,
            source,
        }
    }
}

/// Allocate the reusable chunk buffer for a source of `len_hint` bytes.
///
/// The buffer is capped at the source length plus one byte, so a chunk
/// larger than the file still completes in one read/write cycle. The
/// allocation is fallible: an oversized chunk becomes an error, not an abort.
pub(crate) fn chunk_buffer(
    chunk_size: ChunkSize,
    len_hint: u64,
) -> Result<Vec<u8>, TryReserveError> {
    let cap = usize::try_from(len_hint.saturating_add(1)).unwrap_or(usize::MAX);
    let len = chunk_size.get().min(cap);

    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Copy everything from `reader` to `writer`, at most `buf.len()` bytes at a time.
///
/// `buf` is reused for every cycle. The loop ends on the first zero-byte
/// read. Each non-empty read is written in full, in order, before the next
/// read is issued. Reads interrupted by a signal are retried; any other
/// failure aborts the transfer immediately.
///
/// `duration` in the returned stats is left at zero for the caller to fill.
pub(crate) fn copy_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    buf: &mut [u8],
) -> Result<CopyStats, TransferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut stats = CopyStats::default();

    loop {
        let n = match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::read(e)),
        };

        let started = Instant::now();
        writer.write_all(&buf[..n]).map_err(TransferError::write)?;
        let elapsed = started.elapsed();

        stats.slowest_write = stats.slowest_write.max(elapsed);
        stats.bytes_copied += u64::try_from(n).unwrap_or(u64::MAX);
        stats.chunks += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            chunk = stats.chunks,
            len = n,
            write_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "chunk written"
        );
    }

    writer.flush().map_err(TransferError::write)?;
    Ok(stats)
}
