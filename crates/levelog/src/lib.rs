#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod line;
pub mod logger;
pub mod terminator;
pub mod testing; // Capture buffers and a recording terminator
pub mod threshold;
pub mod wrapper;

pub use config::LoggerConfig;
pub use error::{ConfigError, ConfigResult};
pub use formatter::{ColouredFormatter, DefaultFormatter, Formatter, FormatterKind};
pub use level::{Level, ParseLevelError};
pub use line::{CallSite, Destination, FileStyle, Flags, LineLogger};
pub use logger::{Logger, LoggerBuilder};
pub use terminator::{ProcessTerminator, Terminator};
pub use threshold::{Threshold, level, set_level};
pub use wrapper::Wrapper;
