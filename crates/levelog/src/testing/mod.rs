//! Testing utilities for levelog output
//!
//! Provides `CaptureBuffer` for capturing what a logger writes and
//! `RecordingTerminator` for observing fatal and panic calls without ending
//! the test process.

mod capture;
mod terminator;

pub use capture::CaptureBuffer;
pub use terminator::{RecordingTerminator, Termination, catch_termination};
