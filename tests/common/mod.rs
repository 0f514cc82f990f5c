//! Common test utilities for integration tests
//!
//! Provides shared fixtures and lookups used across multiple integration
//! test files.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ccms_config::{KeyLookup, LookupError, MapLookup};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `name` inside `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// In-memory lookup over `(key, value)` pairs
pub fn lookup_table(entries: &[(&str, &str)]) -> MapLookup {
    entries.iter().copied().collect()
}

/// Lookup that records every key it is asked for
pub struct RecordingLookup {
    inner: MapLookup,
    calls: RefCell<Vec<String>>,
}

impl RecordingLookup {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            inner: lookup_table(entries),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl KeyLookup for RecordingLookup {
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        self.calls.borrow_mut().push(key.to_string());
        self.inner.lookup(key)
    }
}
