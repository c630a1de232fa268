//! CaptureBuffer for collecting logger output in tests
//!
//! A cloneable in-memory destination. Hand one clone to a logger and keep
//! another to read and assert on what was written.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use strip_ansi_escapes::strip;

/// In-memory destination that records every byte written to it
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes written so far
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Everything written so far, ANSI codes preserved
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Everything written so far with ANSI codes stripped
    #[must_use]
    pub fn stripped(&self) -> String {
        String::from_utf8_lossy(&strip(self.bytes())).into_owned()
    }

    /// Drain the buffer, returning what it held (ANSI codes preserved)
    pub fn take(&self) -> String {
        let drained = std::mem::take(&mut *self.bytes.lock().unwrap_or_else(PoisonError::into_inner));
        String::from_utf8_lossy(&drained).into_owned()
    }

    /// Stripped output split into lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.stripped().lines().map(String::from).collect()
    }

    /// Check whether nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Check if stripped output contains a string
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.stripped().contains(needle)
    }

    /// Check if the raw output (with ANSI codes) matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.contents()),
            Err(_) => false,
        }
    }

    /// Assert that stripped output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.stripped()
        );
    }

    /// Assert that nothing was written
    ///
    /// # Panics
    ///
    /// Panics if the buffer holds any bytes.
    pub fn assert_empty(&self) {
        assert!(
            self.is_empty(),
            "Expected no output. Actual output:\n{:?}",
            self.contents()
        );
    }

    /// Assert output has specific number of lines
    ///
    /// # Panics
    ///
    /// Panics if the line count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.lines().len();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.stripped()
        );
    }
}

impl std::fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureBuffer")
            .field("len", &self.bytes().len())
            .finish()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
