//! Symlink handling integration tests for lcp CLI.
//!
//! Symlinks are always followed: the copy reads the file a source link
//! points to and writes through a destination link.
//! - Symlinked source: target content is copied into a regular file
//! - Symlinked destination: the link target is overwritten
//! - Dangling source link: reported as a missing source

#[cfg(unix)]
mod unix_tests {
    use crate::common::TestFixture;
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::symlink;

    /// Test that a symlinked source is copied as the content it points to.
    #[test]
    fn test_symlinked_source_copies_target_content() {
        let fx = TestFixture::new();
        let target = fx.source_file("target.txt", "target content");
        let link = fx.src.path().join("link");
        symlink(&target, &link).unwrap();
        let dst = fx.dest_path("copied.txt");

        let mut cmd = cargo_bin_cmd!("lcp");
        cmd.arg(&link).arg(&dst).assert().success();

        let metadata = fs::symlink_metadata(&dst).unwrap();
        assert!(metadata.file_type().is_file(), "Should be a regular file");
        assert_eq!(fs::read_to_string(&dst).unwrap(), "target content");
    }

    /// Test that a destination symlink is written through, not replaced.
    #[test]
    fn test_symlinked_destination_is_written_through() {
        let fx = TestFixture::new();
        let src = fx.source_file("new.txt", "fresh");
        let real = fx.dest_path("real.txt");
        fs::write(&real, "stale content").unwrap();
        let link = fx.dest_path("link.txt");
        symlink(&real, &link).unwrap();

        let mut cmd = cargo_bin_cmd!("lcp");
        cmd.arg(&src).arg(&link).assert().success();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "fresh");
    }

    /// Test that a dangling source symlink is reported as a missing source.
    #[test]
    fn test_dangling_source_symlink() {
        let fx = TestFixture::new();
        let link = fx.src.path().join("dangling");
        symlink(fx.src.path().join("gone.txt"), &link).unwrap();
        let dst = fx.dest_path("out.txt");

        let mut cmd = cargo_bin_cmd!("lcp");
        cmd.arg(&link)
            .arg(&dst)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error[not_found]"));

        assert!(!dst.exists());
    }

    /// Test that a destination symlink back to the source is caught.
    #[test]
    fn test_destination_symlink_to_source_is_rejected() {
        let fx = TestFixture::new();
        let src = fx.source_file("data.txt", "keep me");
        let link = fx.dest_path("alias.txt");
        symlink(&src, &link).unwrap();

        let mut cmd = cargo_bin_cmd!("lcp");
        cmd.arg(&src)
            .arg(&link)
            .assert()
            .failure()
            .stderr(predicate::str::contains("same file"));

        assert_eq!(fs::read_to_string(&src).unwrap(), "keep me");
    }

    /// Test that a FIFO source is refused instead of blocking on read.
    #[test]
    fn test_fifo_source_is_rejected() {
        let fx = TestFixture::new();
        let fifo = fx.src.path().join("pipe");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status();
        if !matches!(status, Ok(s) if s.success()) {
            eprintln!("SKIP: mkfifo not available");
            return;
        }
        let dst = fx.dest_path("out");

        let mut cmd = cargo_bin_cmd!("lcp");
        cmd.arg(&fifo)
            .arg(&dst)
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("not a regular file"));

        assert!(!dst.exists());
    }
}
