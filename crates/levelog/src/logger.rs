//! The five-level logger facade.
//!
//! A [`Logger`] holds one [`Wrapper`] per level. DEBUG, INFO and WARNING
//! write to the standard destination; ERROR and FATAL write to the error
//! destination.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use levelog::{ColouredFormatter, Logger};
//!
//! // Process stdout/stderr, no colour, global threshold.
//! let logger = Logger::new(None, None, None);
//! logger.info.print("server started");
//!
//! // Or use the builder for more control
//! let logger = Logger::builder()
//!     .formatter(Arc::new(ColouredFormatter))
//!     .build();
//! logger.warning.printf(format_args!("{} retries left", 2));
//! ```
//!
//! The facade also implements [`log::Log`], so it can be installed as the
//! backend of the `log` crate with [`Logger::install`] or
//! [`LoggerBuilder::init`].

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use log::{LevelFilter, Log, Metadata, Record};

use crate::formatter::{DefaultFormatter, Formatter};
use crate::line::{CallSite, Destination, Flags, LineLogger};
use crate::terminator::{ProcessTerminator, Terminator};
use crate::wrapper::Wrapper;
use crate::{Level, Threshold};

/// One wrapper per level.
#[derive(Debug)]
pub struct Logger {
    pub debug: Wrapper,
    pub info: Wrapper,
    pub warning: Wrapper,
    pub error: Wrapper,
    pub fatal: Wrapper,
    threshold: Threshold,
}

impl Logger {
    /// Creates a logger. Never fails.
    ///
    /// - `out` defaults to process stdout
    /// - `err_out` defaults to process stderr
    /// - `formatter` defaults to [`DefaultFormatter`]
    ///
    /// The logger follows the process-wide threshold
    /// ([`set_level`](crate::set_level)) and uses [`Flags::default`].
    #[must_use]
    pub fn new(
        out: Option<Destination>,
        err_out: Option<Destination>,
        formatter: Option<Arc<dyn Formatter>>,
    ) -> Self {
        LoggerBuilder {
            stdout: out,
            stderr: err_out,
            formatter,
            ..LoggerBuilder::new()
        }
        .build()
    }

    /// Create a logger using the builder pattern.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Returns the wrapper for `level`.
    #[must_use]
    pub fn wrapper(&self, level: Level) -> &Wrapper {
        match level {
            Level::Debug => &self.debug,
            Level::Info => &self.info,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
            Level::Fatal => &self.fatal,
        }
    }

    /// The threshold shared by all five wrappers.
    #[must_use]
    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    /// Sets the threshold shared by all five wrappers.
    ///
    /// For a logger built with the global threshold this is the same as
    /// [`set_level`](crate::set_level) and affects every such logger.
    pub fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    /// Installs this logger as the `log` crate's global logger.
    ///
    /// The logger is leaked to obtain a `'static` reference, which is
    /// returned so the level fields stay usable directly. The `log` max level
    /// is opened fully; filtering is left to the threshold.
    ///
    /// Returns an error if a logger has already been set.
    pub fn install(self) -> Result<&'static Logger, log::SetLoggerError> {
        let leaked: &'static Logger = Box::leak(Box::new(self));
        log::set_logger(leaked)?;
        log::set_max_level(LevelFilter::Trace);
        Ok(leaked)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.threshold.allows(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let site = match (record.file(), record.line()) {
            (Some(file), Some(line)) => CallSite { file, line },
            _ => CallSite::UNKNOWN,
        };
        self.wrapper(Level::from(record.level()))
            .log_at(site, record.args());
    }

    fn flush(&self) {}
}

/// Builder for configuring a [`Logger`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use levelog::{ColouredFormatter, Flags, Level, Logger, Threshold};
/// use levelog::testing::CaptureBuffer;
///
/// let out = CaptureBuffer::new();
/// let logger = Logger::builder()
///     .stdout(out.clone())
///     .formatter(Arc::new(ColouredFormatter))
///     .threshold(Threshold::new(Level::Debug))
///     .flags(Flags::empty())
///     .build();
///
/// logger.debug.print("visible");
/// assert_eq!(out.contents(), "\x1b[0;92mDEBUG: visible\x1b[0m\n");
/// ```
pub struct LoggerBuilder {
    stdout: Option<Destination>,
    stderr: Option<Destination>,
    formatter: Option<Arc<dyn Formatter>>,
    threshold: Option<Threshold>,
    flags: Flags,
    terminator: Arc<dyn Terminator>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("custom_stdout", &self.stdout.is_some())
            .field("custom_stderr", &self.stderr.is_some())
            .field("threshold", &self.threshold)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: None,
            stderr: None,
            formatter: None,
            threshold: None,
            flags: Flags::default(),
            terminator: Arc::new(ProcessTerminator),
        }
    }

    /// Destination for DEBUG, INFO and WARNING.
    #[must_use]
    pub fn stdout<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.stdout = Some(Box::new(out));
        self
    }

    /// Destination for ERROR and FATAL.
    #[must_use]
    pub fn stderr<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.stderr = Some(Box::new(out));
        self
    }

    /// Set the formatter shared by all five wrappers.
    #[must_use]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Use an explicit threshold instead of the process-wide one.
    #[must_use]
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the line header flags.
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set what runs after fatal and panic lines.
    #[must_use]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Build the logger without installing it.
    #[must_use]
    pub fn build(self) -> Logger {
        let formatter = self
            .formatter
            .unwrap_or_else(|| Arc::new(DefaultFormatter));
        let threshold = self.threshold.unwrap_or_else(Threshold::global);
        let stdout = SharedDestination::new(self.stdout.unwrap_or_else(|| Box::new(io::stdout())));
        let stderr = SharedDestination::new(self.stderr.unwrap_or_else(|| Box::new(io::stderr())));

        let wrap = |level: Level| {
            let out = if level.is_error_class() {
                stderr.clone()
            } else {
                stdout.clone()
            };
            let prefix = format!("{}{}", formatter.prefix(level), level.label());
            let line = LineLogger::new(out, prefix, self.flags)
                .with_terminator(Arc::clone(&self.terminator));
            Wrapper::new(level, Arc::clone(&formatter), threshold.clone(), line)
        };

        Logger {
            debug: wrap(Level::Debug),
            info: wrap(Level::Info),
            warning: wrap(Level::Warning),
            error: wrap(Level::Error),
            fatal: wrap(Level::Fatal),
            threshold: threshold.clone(),
        }
    }

    /// Build and install as the `log` crate's global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<&'static Logger, log::SetLoggerError> {
        self.build().install()
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

/// A destination shared by several line loggers.
///
/// Each line logger hands over a whole line in one `write_all`; the lock is
/// held for that entire call so lines from different levels do not mix.
#[derive(Clone)]
struct SharedDestination(Arc<Mutex<Destination>>);

impl SharedDestination {
    fn new(out: Destination) -> Self {
        Self(Arc::new(Mutex::new(out)))
    }
}

impl Write for SharedDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}
