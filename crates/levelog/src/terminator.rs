//! Non-local exits performed after fatal and panic lines.

/// The effect that runs once a fatal or panic line has been written.
///
/// Both methods diverge. Production code uses [`ProcessTerminator`]; tests
/// inject [`RecordingTerminator`](crate::testing::RecordingTerminator) to
/// observe the exit without ending the test process.
pub trait Terminator: Send + Sync {
    /// Ends the process with `code`.
    fn exit(&self, code: i32) -> !;

    /// Unwinds the current thread carrying `message`.
    fn panic(&self, message: String) -> !;
}

/// Terminator that really exits or panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn exit(&self, code: i32) -> ! {
        std::process::exit(code)
    }

    fn panic(&self, message: String) -> ! {
        std::panic::panic_any(message)
    }
}
