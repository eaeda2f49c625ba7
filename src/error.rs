//! Error types for lazycopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during a copy, the [`ErrorCode`] classification used by
//! front ends, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Code | Errors |
//! |------|--------|
//! | `invalid_argument` | [`Error::InvalidChunkSize`], [`Error::ChunkAllocation`], [`Error::NotARegularFile`], [`Error::SameFile`] |
//! | `not_found` | [`Error::SourceNotFound`] |
//! | `permission_denied` | [`Error::PermissionDenied`] |
//! | `invalid_path` | [`Error::DestinationParentMissing`], [`Error::IsADirectory`] |
//! | `already_exists` | [`Error::AlreadyExists`] |
//! | `io_error` | [`Error::Io`], [`Error::NoSpace`] |

use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for lazycopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use lazycopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    // The raw OS error might be available even if kind() isn't StorageFull
    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
///
/// Front ends use this to pick an exit code and to report failures in
/// structured output. The string form returned by [`ErrorCode::as_str`]
/// is part of the public interface and will not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A parameter was rejected before any I/O took place.
    InvalidArgument,
    /// The source file does not exist.
    NotFound,
    /// The OS refused access to the source or the destination.
    PermissionDenied,
    /// The destination path cannot hold a file.
    InvalidPath,
    /// The destination exists and overwriting was not allowed.
    AlreadyExists,
    /// A read, write or sync failed during the transfer.
    IoError,
}

impl ErrorCode {
    /// The snake_case name of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidPath => "invalid_path",
            Self::AlreadyExists => "already_exists",
            Self::IoError => "io_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during a copy.
///
/// Every variant that concerns a file carries the offending path so a
/// front end can report it without extra context.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Chunk size must be a positive number of bytes
    #[error("Invalid chunk size {0}: must be greater than zero")]
    InvalidChunkSize(i64),

    /// The buffer for one chunk could not be allocated
    #[error("Cannot allocate a {chunk_size}-byte chunk buffer: {source}")]
    ChunkAllocation {
        /// Requested chunk size in bytes
        chunk_size: usize,
        /// Underlying error
        source: TryReserveError,
    },

    /// Source exists but is a directory, FIFO, socket or device
    #[error("Source is not a regular file: {0}")]
    NotARegularFile(PathBuf),

    /// Source and destination resolve to the same file
    #[error("Source and destination are the same file: {src} and {dst}")]
    SameFile {
        /// Source path as given
        src: PathBuf,
        /// Destination path as given
        dst: PathBuf,
    },

    /// Source path does not exist
    #[error("Source file does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Access to the source or the destination was refused
    #[error("Permission denied: {path}: {source}")]
    PermissionDenied {
        /// Path that could not be accessed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The directory that should contain the destination is missing or is not a directory
    #[error("Destination directory does not exist: {0}")]
    DestinationParentMissing(PathBuf),

    /// Destination is an existing directory
    #[error("Destination is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Destination already exists
    #[error("Destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// No space left on device while writing the destination
    ///
    /// The destination may hold the bytes written before the failure.
    #[error("No space left on device while writing {path}: {source}")]
    NoSpace {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// IO error while opening, reading, writing or syncing a file
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidChunkSize(_)
            | Self::ChunkAllocation { .. }
            | Self::NotARegularFile(_)
            | Self::SameFile { .. } => {
                ErrorCode::InvalidArgument
            }
            Self::SourceNotFound(_) => ErrorCode::NotFound,
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::DestinationParentMissing(_) | Self::IsADirectory(_) => ErrorCode::InvalidPath,
            Self::AlreadyExists(_) => ErrorCode::AlreadyExists,
            Self::NoSpace { .. } | Self::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Wrap an error from a transfer-phase operation on `path`.
    ///
    /// Storage-full conditions become [`Error::NoSpace`], everything else
    /// stays an [`Error::Io`].
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if is_no_space_error(&source) {
            Self::NoSpace {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wrap an error from opening or inspecting the source file.
    pub(crate) fn source_access(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::io(path, source),
        }
    }

    /// Wrap an error from creating the destination file.
    ///
    /// `NotFound` or `NotADirectory` at this point means a parent
    /// component is missing or is a regular file.
    pub(crate) fn destination_access(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                let parent = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(path);
                Self::DestinationParentMissing(parent.to_path_buf())
            }
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            io::ErrorKind::IsADirectory => Self::IsADirectory(path.to_path_buf()),
            _ => Self::io(path, source),
        }
    }
}
