//! Builder API for ergonomic copying operations.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a copy. This is often more convenient than manually
//! constructing [`CopyOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use lazycopy::CopyBuilder;
//!
//! // Copy with the default 4 KiB chunk, overwriting any existing file
//! let stats = CopyBuilder::new("input.log", "output.log").run()?;
//! # Ok::<(), lazycopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use lazycopy::{ChunkSize, CopyBuilder};
//!
//! let stats = CopyBuilder::new("disk.img", "backup.img")
//!     .chunk_size(ChunkSize::try_from(1_048_576_i64)?)
//!     .error_on_existing()
//!     .fsync()
//!     .run()?;
//! # Ok::<(), lazycopy::Error>(())
//! ```

use crate::copy::{CopyStats, copy_file};
use crate::error::Result;
use crate::options::{ChunkSize, CopyOptions, OnConflict};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a single file copy.
///
/// # Example
///
/// ```no_run
/// use lazycopy::CopyBuilder;
///
/// match CopyBuilder::new("a.bin", "b.bin").skip_existing().run()? {
///     Some(stats) => println!("copied {} bytes", stats.bytes_copied),
///     None => println!("b.bin already exists"),
/// }
/// # Ok::<(), lazycopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (4096-byte chunks, overwrite existing, no fsync).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Set the number of bytes read and written per cycle.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: ChunkSize) -> Self {
        self.options = self.options.with_chunk_size(chunk_size);
        self
    }

    /// Truncate and rewrite an existing destination (default behavior).
    #[must_use]
    pub fn overwrite(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Overwrite);
        self
    }

    /// Leave an existing destination untouched; [`run`](Self::run) returns `Ok(None)`.
    #[must_use]
    pub fn skip_existing(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Skip);
        self
    }

    /// Fail if the destination already exists.
    #[must_use]
    pub fn error_on_existing(mut self) -> Self {
        self.options = self.options.with_on_conflict(OnConflict::Error);
        self
    }

    /// Sync the destination to disk before closing it.
    #[must_use]
    pub fn fsync(mut self) -> Self {
        self.options = self.options.with_fsync();
        self
    }

    /// Get the configured options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// Returns `Ok(None)` if the destination existed and
    /// [`skip_existing`](Self::skip_existing) was selected.
    ///
    /// # Errors
    ///
    /// See [`copy_file`].
    pub fn run(self) -> Result<Option<CopyStats>> {
        copy_file(&self.src, &self.dst, &self.options)
    }
}
