//! Core copy operations.
//!
//! This module provides the chunked single file copy: a bounded buffer is
//! filled from the source and drained into the destination until the
//! source reports end of file.

mod chunked;
mod file;
mod utils;

// Re-export public API
pub use chunked::CopyStats;
pub use file::copy_file;
