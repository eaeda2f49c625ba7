//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior,
//! [`ChunkSize`] for the per-read buffer size and [`OnConflict`] for
//! handling an existing destination.
//!
//! # Example
//!
//! ```
//! use lazycopy::{ChunkSize, CopyOptions, OnConflict};
//!
//! let options = CopyOptions::default()
//!     .with_chunk_size(ChunkSize::try_from(64 * 1024_usize)?)
//!     .with_on_conflict(OnConflict::Error)
//!     .with_fsync();
//! # Ok::<(), lazycopy::Error>(())
//! ```

use crate::error::Error;
use std::fmt;
use std::num::NonZeroUsize;

/// Number of bytes requested per read.
///
/// A `ChunkSize` is always greater than zero, so a copy configured with one
/// can never stall on an empty buffer. Invalid values are rejected when the
/// `ChunkSize` is built, before any file is touched.
///
/// # Example
///
/// ```
/// use lazycopy::ChunkSize;
///
/// assert_eq!(ChunkSize::default().get(), 4096);
/// assert!(ChunkSize::try_from(0_i64).is_err());
/// assert!(ChunkSize::try_from(-1_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "u64"))]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    /// Default chunk size: 4 KiB.
    pub const DEFAULT: Self = match NonZeroUsize::new(4096) {
        Some(bytes) => Self(bytes),
        None => unreachable!(),
    };

    /// Wrap an already non-zero size.
    pub const fn new(bytes: NonZeroUsize) -> Self {
        Self(bytes)
    }

    /// The chunk size in bytes.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for ChunkSize {
    type Error = Error;

    fn try_from(bytes: i64) -> Result<Self, Self::Error> {
        usize::try_from(bytes)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(Error::InvalidChunkSize(bytes))
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = Error;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(bytes)
            .map(Self)
            .ok_or(Error::InvalidChunkSize(0))
    }
}

impl From<ChunkSize> for u64 {
    fn from(size: ChunkSize) -> Self {
        u64::try_from(size.get()).unwrap_or(u64::MAX)
    }
}

/// Behavior when the destination file already exists.
///
/// # Default
///
/// The default is [`OnConflict::Overwrite`]: the destination is truncated
/// and rewritten, so copying twice gives the same result as copying once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnConflict {
    /// Truncate the existing file and write the source content (default).
    #[default]
    Overwrite,
    /// Leave the existing file unchanged and report the copy as skipped.
    Skip,
    /// Fail with [`Error::AlreadyExists`].
    Error,
}

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `chunk_size` | 4096 | Bytes per read/write cycle |
/// | `on_conflict` | `Overwrite` | Truncate an existing destination |
/// | `fsync` | `false` | Sync destination to disk before closing |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CopyOptions {
    /// Bytes requested per read (default: 4096)
    ///
    /// Memory use of a copy is bounded by this value, whatever the size of
    /// the source.
    pub chunk_size: ChunkSize,

    /// Behavior when destination file already exists
    pub on_conflict: OnConflict,

    /// Whether to sync the destination to disk after writing (default: false)
    pub fsync: bool,
}

impl CopyOptions {
    /// Set the chunk size
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: ChunkSize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the conflict behavior
    #[must_use]
    pub fn with_on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Sync the destination to disk before closing it
    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }
}
