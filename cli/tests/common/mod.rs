//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Write `content` to a file in the source directory and return its path.
    pub fn source_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.src.path().join(name);
        fs::write(&path, content).expect("Failed to write source file");
        path
    }

    /// Path of `name` inside the destination directory (not created).
    pub fn dest_path(&self, name: &str) -> PathBuf {
        self.dst.path().join(name)
    }

    /// Check that `path` holds exactly `expected`.
    pub fn assert_file_bytes(&self, path: &Path, expected: &[u8]) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read(path).expect("Failed to read file");
        assert_eq!(actual.len(), expected.len(), "File length mismatch");
        assert!(actual == expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic content whose period does not line up with common chunk sizes.
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Whether the tests run with root privileges (permission checks are bypassed).
#[cfg(unix)]
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}
