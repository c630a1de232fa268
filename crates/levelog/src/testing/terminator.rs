//! A terminator that records instead of ending the process.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use crate::terminator::Terminator;

/// What a fatal or panic call asked the terminator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// `exit(code)` was requested.
    Exit { code: i32 },
    /// A panic carrying `message` was requested.
    Panic { message: String },
}

/// Terminator that records every request and unwinds with a [`Termination`].
///
/// The unwind uses `resume_unwind`, so no panic hook output is produced. Use
/// [`catch_termination`] to run the code under test and get the request
/// back as a value.
#[derive(Debug, Clone, Default)]
pub struct RecordingTerminator {
    seen: Arc<Mutex<Vec<Termination>>>,
}

impl RecordingTerminator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every termination requested so far, oldest first.
    #[must_use]
    pub fn terminations(&self) -> Vec<Termination> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, termination: Termination) -> ! {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(termination.clone());
        panic::resume_unwind(Box::new(termination))
    }
}

impl Terminator for RecordingTerminator {
    fn exit(&self, code: i32) -> ! {
        self.record(Termination::Exit { code })
    }

    fn panic(&self, message: String) -> ! {
        self.record(Termination::Panic { message })
    }
}

/// Runs `f`, turning a [`RecordingTerminator`] unwind into `Err`.
///
/// Returns `Ok` with the closure's value when no termination happened.
/// Unrelated panics are propagated unchanged.
pub fn catch_termination<R>(f: impl FnOnce() -> R) -> Result<R, Termination> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<Termination>() {
            Ok(termination) => Err(*termination),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
