//! # File I/O Module
//!
//! Reading and writing whole files for the processor.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a file as UTF-8.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replaces the content of a file.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_read_write_roundtrip() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("a.py");

    FileIO::write_file(&path, "# header\n\ncode\n").expect("write should succeed");
    assert_eq!(
      FileIO::read_full_content(&path).expect("read should succeed"),
      "# header\n\ncode\n"
    );
  }

  #[test]
  fn test_read_rejects_invalid_utf8() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("blob.bin");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write bytes");

    let err = FileIO::read_full_content(&path).expect_err("invalid UTF-8 should fail");
    assert!(err.to_string().contains("Failed to read file"));
  }

  #[test]
  fn test_read_missing_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    assert!(FileIO::read_full_content(&temp_dir.path().join("missing.rs")).is_err());
  }
}
