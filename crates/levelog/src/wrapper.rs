//! Per-level emission handle.
//!
//! A [`Wrapper`] is the object behind `logger.info`, `logger.error` and the
//! other level fields of a [`Logger`](crate::Logger). It owns:
//!
//! - its fixed [`Level`]
//! - a shared [`Formatter`]
//! - a [`Threshold`] handle, usually shared with every other wrapper
//! - a [`LineLogger`] whose static prefix is the formatter prefix followed by
//!   the level label
//!
//! Every method follows the same steps: check the threshold, render the body,
//! let the formatter decorate it, append the formatter suffix and hand the
//! result to the line logger together with the caller's location.
//!
//! All emission methods are `#[track_caller]`, so `file:line` in the header
//! points at the code that called `print`, not at this module.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::formatter::Formatter;
use crate::line::{CallSite, LineLogger};
use crate::{Level, Threshold};

/// Emits lines at one fixed level.
pub struct Wrapper {
    level: Level,
    formatter: Arc<dyn Formatter>,
    threshold: Threshold,
    line: LineLogger,
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("level", &self.level)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

impl Wrapper {
    /// Creates a wrapper around an already configured line logger.
    ///
    /// The line logger's prefix is used as is; [`Logger`](crate::Logger)
    /// builds it as `formatter.prefix(level) + level.label()`.
    #[must_use]
    pub fn new(
        level: Level,
        formatter: Arc<dyn Formatter>,
        threshold: Threshold,
        line: LineLogger,
    ) -> Self {
        Self {
            level,
            formatter,
            threshold,
            line,
        }
    }

    /// The level this wrapper writes at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether a call made now would be written.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.threshold.allows(self.level)
    }

    /// The threshold this wrapper consults.
    #[must_use]
    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    /// The underlying line logger.
    #[must_use]
    pub fn line_logger(&self) -> &LineLogger {
        &self.line
    }

    fn decorate(&self, body: Cow<'_, str>) -> String {
        let mut out = self.formatter.format(self.level, body).into_owned();
        out.push_str(self.formatter.suffix(self.level));
        out
    }

    fn render_args(args: fmt::Arguments<'_>) -> Cow<'_, str> {
        match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        }
    }

    fn render_parts(parts: &[&dyn fmt::Display]) -> Cow<'static, str> {
        let mut body = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                body.push(' ');
            }
            body.push_str(&part.to_string());
        }
        Cow::Owned(body)
    }

    // ─────────────────────────────────────────────────
    // Print family
    // ─────────────────────────────────────────────────

    /// Writes `message` as one line.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Cow::Owned(message.to_string()));
        self.line.print(CallSite::caller(), &body);
    }

    /// Writes preformatted arguments as one line.
    ///
    /// ```
    /// # let logger = levelog::Logger::builder().stdout(std::io::sink()).build();
    /// logger.info.printf(format_args!("listening on {}:{}", "0.0.0.0", 8080));
    /// ```
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_args(args));
        self.line.print(CallSite::caller(), &body);
    }

    /// Writes `parts` separated by single spaces as one line.
    #[track_caller]
    pub fn println(&self, parts: &[&dyn fmt::Display]) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_parts(parts));
        self.line.print(CallSite::caller(), &body);
    }

    // ─────────────────────────────────────────────────
    // Fatal family
    // ─────────────────────────────────────────────────

    /// Like [`print`](Self::print), then exits the process with status 1.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Cow::Owned(message.to_string()));
        self.line.fatal(CallSite::caller(), &body)
    }

    /// Like [`printf`](Self::printf), then exits the process with status 1.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_args(args));
        self.line.fatal(CallSite::caller(), &body)
    }

    /// Like [`println`](Self::println), then exits the process with status 1.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn fatalln(&self, parts: &[&dyn fmt::Display]) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_parts(parts));
        self.line.fatal(CallSite::caller(), &body)
    }

    // ─────────────────────────────────────────────────
    // Panic family
    // ─────────────────────────────────────────────────

    /// Like [`print`](Self::print), then panics with the decorated body.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Cow::Owned(message.to_string()));
        self.line.panic(CallSite::caller(), &body)
    }

    /// Like [`printf`](Self::printf), then panics with the decorated body.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_args(args));
        self.line.panic(CallSite::caller(), &body)
    }

    /// Like [`println`](Self::println), then panics with the decorated body.
    ///
    /// Returns only when the level is filtered out by the threshold.
    #[track_caller]
    pub fn panicln(&self, parts: &[&dyn fmt::Display]) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_parts(parts));
        self.line.panic(CallSite::caller(), &body)
    }

    /// Writes a line for an explicit call site. Never terminates.
    ///
    /// Used by the `log` bridge, where the location comes from the record.
    pub fn log_at(&self, site: CallSite<'_>, args: &fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        let body = self.decorate(Self::render_args(*args));
        self.line.print(site, &body);
    }
}
