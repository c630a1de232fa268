//! Message decoration strategies.
//!
//! A [`Formatter`] decides what goes around a line: a prefix placed before
//! the level label, a suffix placed after the message body, and an optional
//! transform of the body itself. Formatters are stateless and shared between
//! the five wrappers of a [`Logger`](crate::Logger).
//!
//! - [`DefaultFormatter`]: no decoration at all
//! - [`ColouredFormatter`]: wraps each line in an ANSI colour and a reset
//!
//! # Example
//!
//! ```
//! use levelog::{ColouredFormatter, Formatter, Level};
//!
//! let f = ColouredFormatter;
//! assert_eq!(f.prefix(Level::Info), "\x1b[0;94m");
//! assert_eq!(f.suffix(Level::Info), "\x1b[0m");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Level;

/// ANSI reset sequence written after every coloured line.
pub const RESET: &str = "\x1b[0m";

/// Decoration strategy applied by each wrapper.
pub trait Formatter: Send + Sync {
    /// Text placed before the level label.
    fn prefix(&self, level: Level) -> &'static str;

    /// Text appended after the message body.
    fn suffix(&self, level: Level) -> &'static str;

    /// Transforms the message body. Must be a pure function of its inputs.
    fn format<'a>(&self, _level: Level, body: Cow<'a, str>) -> Cow<'a, str> {
        body
    }
}

/// Formatter that leaves every line undecorated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn prefix(&self, _level: Level) -> &'static str {
        ""
    }

    fn suffix(&self, _level: Level) -> &'static str {
        ""
    }
}

/// Formatter that colours whole lines for terminal output.
///
/// The colour escape is emitted as the prefix and the reset as the suffix, so
/// the label, header and message all share the level's colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColouredFormatter;

impl ColouredFormatter {
    /// Returns the escape sequence that starts a `level` line.
    #[must_use]
    pub const fn escape(level: Level) -> &'static str {
        match level {
            Level::Debug => "\x1b[0;92m",
            Level::Info => "\x1b[0;94m",
            Level::Warning => "\x1b[0;95m",
            Level::Error | Level::Fatal => "\x1b[0;91m",
        }
    }

    /// Returns the SGR parameters used for `level`, e.g. `"0;94"`.
    #[must_use]
    pub fn code(level: Level) -> &'static str {
        let escape = Self::escape(level);
        &escape[2..escape.len() - 1]
    }
}

impl Formatter for ColouredFormatter {
    fn prefix(&self, level: Level) -> &'static str {
        Self::escape(level)
    }

    fn suffix(&self, _level: Level) -> &'static str {
        RESET
    }
}

/// Formatter selection as it appears in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FormatterKind {
    /// Always [`DefaultFormatter`].
    Plain,
    /// Always [`ColouredFormatter`].
    Coloured,
    /// Coloured when the terminal supports it, plain otherwise.
    #[default]
    Auto,
}

impl FormatterKind {
    /// Resolves `Auto` against the current terminal.
    #[must_use]
    pub fn resolve(self) -> Arc<dyn Formatter> {
        let coloured = match self {
            Self::Plain => false,
            Self::Coloured => true,
            Self::Auto => console::colors_enabled() && console::colors_enabled_stderr(),
        };
        if coloured {
            Arc::new(ColouredFormatter)
        } else {
            Arc::new(DefaultFormatter)
        }
    }
}

impl std::str::FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "none" | "never" => Ok(Self::Plain),
            "coloured" | "colored" | "colour" | "color" | "always" => Ok(Self::Coloured),
            "auto" => Ok(Self::Auto),
            _ => Err(format!(
                "Unknown formatter: {s}. Expected: plain, coloured, auto"
            )),
        }
    }
}

impl TryFrom<String> for FormatterKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
