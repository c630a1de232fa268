//! Line-oriented writer underneath each wrapper.
//!
//! A [`LineLogger`] is bound once to a destination, a static prefix and a set
//! of header [`Flags`]. Every call renders exactly one line:
//!
//! ```text
//! <prefix><date> <time> <file>:<line> <body>\n
//! ```
//!
//! Each component of the header is optional and controlled by the flags. The
//! full line is built in memory and handed to the destination in a single
//! `write_all` under a mutex, so lines from concurrent threads never
//! interleave.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::terminator::{ProcessTerminator, Terminator};

/// Boxed destination stream.
pub type Destination = Box<dyn Write + Send>;

/// How the call site is rendered in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FileStyle {
    /// No call site.
    #[default]
    None,
    /// Final path component and line, e.g. `main.rs:12`.
    Short,
    /// Full path as compiled and line, e.g. `src/bin/main.rs:12`.
    Long,
}

impl std::str::FromStr for FileStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "short" => Ok(Self::Short),
            "long" | "full" => Ok(Self::Long),
            _ => Err(format!("Unknown file style: {s}. Expected: none, short, long")),
        }
    }
}

impl TryFrom<String> for FileStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Header options for a [`LineLogger`].
///
/// The default is date, time and short file, the header used by
/// [`Logger::new`](crate::Logger::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Date as `YYYY/MM/DD`.
    pub date: bool,
    /// Time as `HH:MM:SS`.
    pub time: bool,
    /// Append `.ffffff` to the time. Implies `time`.
    pub microseconds: bool,
    /// Use UTC instead of the local time zone.
    pub utc: bool,
    /// Call-site rendering.
    pub file: FileStyle,
    /// Move the prefix from the start of the line to just before the body.
    pub msg_prefix: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            file: FileStyle::Short,
            ..Self::standard()
        }
    }
}

impl Flags {
    /// No header at all: the line is prefix plus body.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            date: false,
            time: false,
            microseconds: false,
            utc: false,
            file: FileStyle::None,
            msg_prefix: false,
        }
    }

    /// Date and time, local zone.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            date: true,
            time: true,
            ..Self::empty()
        }
    }

    #[must_use]
    pub fn with_date(mut self, on: bool) -> Self {
        self.date = on;
        self
    }

    #[must_use]
    pub fn with_time(mut self, on: bool) -> Self {
        self.time = on;
        self
    }

    #[must_use]
    pub fn with_microseconds(mut self, on: bool) -> Self {
        self.microseconds = on;
        self
    }

    #[must_use]
    pub fn with_utc(mut self, on: bool) -> Self {
        self.utc = on;
        self
    }

    #[must_use]
    pub fn with_file(mut self, style: FileStyle) -> Self {
        self.file = style;
        self
    }

    #[must_use]
    pub fn with_msg_prefix(mut self, on: bool) -> Self {
        self.msg_prefix = on;
        self
    }
}

/// Source location attached to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl CallSite<'static> {
    /// Placeholder used when no location is known.
    pub const UNKNOWN: CallSite<'static> = CallSite {
        file: "???",
        line: 0,
    };

    /// Location of the caller, propagated through `#[track_caller]` frames.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl<'a> CallSite<'a> {
    fn short_file(&self) -> &'a str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// Writes prefixed, timestamped lines to one destination.
pub struct LineLogger {
    out: Mutex<Destination>,
    prefix: String,
    flags: Flags,
    terminator: Arc<dyn Terminator>,
}

impl fmt::Debug for LineLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineLogger")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl LineLogger {
    /// Creates a line logger writing to `out`.
    #[must_use]
    pub fn new<W: Write + Send + 'static>(out: W, prefix: impl Into<String>, flags: Flags) -> Self {
        Self::from_boxed(Box::new(out), prefix, flags)
    }

    /// Creates a line logger from an already boxed destination.
    #[must_use]
    pub fn from_boxed(out: Destination, prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            out: Mutex::new(out),
            prefix: prefix.into(),
            flags,
            terminator: Arc::new(ProcessTerminator),
        }
    }

    /// Replaces the terminator run after fatal and panic lines.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// The static prefix written on every line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The header flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Writes one line, reporting any I/O failure.
    pub fn output(&self, site: CallSite<'_>, body: &str) -> io::Result<()> {
        let line = self.render(site, body, self.now());
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        out.flush()
    }

    /// Writes one line. Write failures are dropped.
    pub fn print(&self, site: CallSite<'_>, body: &str) {
        let _ = self.output(site, body);
    }

    /// Writes one line, then exits the process with status 1.
    pub fn fatal(&self, site: CallSite<'_>, body: &str) -> ! {
        let _ = self.output(site, body);
        self.terminator.exit(1)
    }

    /// Writes one line, then panics with the body as payload.
    pub fn panic(&self, site: CallSite<'_>, body: &str) -> ! {
        let _ = self.output(site, body);
        self.terminator.panic(body.to_string())
    }

    fn now(&self) -> NaiveDateTime {
        if self.flags.utc {
            chrono::Utc::now().naive_utc()
        } else {
            chrono::Local::now().naive_local()
        }
    }

    /// Renders a full line for the given time without writing it.
    #[must_use]
    pub fn render(&self, site: CallSite<'_>, body: &str, now: NaiveDateTime) -> String {
        let mut line = String::with_capacity(self.prefix.len() + body.len() + 48);
        let flags = self.flags;

        if !flags.msg_prefix {
            line.push_str(&self.prefix);
        }
        if flags.date {
            line.push_str(&now.format("%Y/%m/%d ").to_string());
        }
        if flags.time || flags.microseconds {
            if flags.microseconds {
                line.push_str(&now.format("%H:%M:%S%.6f ").to_string());
            } else {
                line.push_str(&now.format("%H:%M:%S ").to_string());
            }
        }
        match flags.file {
            FileStyle::None => {}
            FileStyle::Short => {
                line.push_str(&format!("{}:{} ", site.short_file(), site.line));
            }
            FileStyle::Long => {
                line.push_str(&format!("{}:{} ", site.file, site.line));
            }
        }
        if flags.msg_prefix {
            line.push_str(&self.prefix);
        }

        line.push_str(body);
        if !body.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}
