//! # lazycopy
//!
//! Bounded-memory, chunk-by-chunk single file copying for Rust.
//!
//! A "lazy" copy never loads the whole file. It reads at most one chunk,
//! writes that chunk to the destination, and repeats until the source is
//! exhausted. Memory use is bounded by the chunk size whatever the file
//! size is.
//!
//! ## Core Features
//!
//! - **Bounded memory**: one reusable buffer of `chunk_size` bytes per copy
//! - **Byte-exact output**: chunk size never affects the copied content
//! - **Truncate-then-write**: an overwritten destination keeps no stale tail
//! - **No surprise destinations**: a missing or unreadable source, or an
//!   invalid chunk size, is reported before the destination is created
//! - **Self-copy guard**: copying a file onto itself (directly, via a hard
//!   link or via a symlink) is rejected instead of truncating the source
//! - **Classified errors**: every [`Error`] maps to a stable [`ErrorCode`]
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use lazycopy::CopyBuilder;
//!
//! if let Some(stats) = CopyBuilder::new("input.bin", "output.bin").run()? {
//!     println!("Copied {} bytes in {} chunks", stats.bytes_copied, stats.chunks);
//! }
//! # Ok::<(), lazycopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use lazycopy::{copy_file, ChunkSize, CopyOptions, OnConflict};
//! use std::path::Path;
//!
//! let options = CopyOptions::default()
//!     .with_chunk_size(ChunkSize::try_from(64 * 1024_i64)?)
//!     .with_on_conflict(OnConflict::Error)
//!     .with_fsync();
//!
//! copy_file(Path::new("src.bin"), Path::new("dst.bin"), &options)?;
//! # Ok::<(), lazycopy::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |
//!
//! Without the `tracing` feature the library emits no log output at all;
//! failures are only reported through the returned [`Error`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;

pub use builder::CopyBuilder;
pub use copy::{CopyStats, copy_file};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{ChunkSize, CopyOptions, OnConflict};
