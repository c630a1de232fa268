//! levelog CLI - Leveled log lines from shell scripts.
//!
//! Commands:
//! - `emit` - Write one message at a severity
//! - `pipe` - Write every stdin line at a severity
//! - `config` - Show the resolved configuration

#![forbid(unsafe_code)]

use std::env;
use std::error::Error;
use std::fmt::Display;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use levelog::{FileStyle, FormatterKind, Level, Logger, LoggerConfig};

type CliResult<T> = Result<T, Box<dyn Error>>;

/// levelog - Write leveled, optionally coloured log lines.
#[derive(Parser)]
#[command(name = "levelog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: the per-user config, when present).
    #[arg(long, short = 'c', global = true, env = "LEVELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum severity written (debug, info, warning, error, fatal).
    #[arg(long, short = 'l', global = true)]
    level: Option<Level>,

    /// Line decoration (plain, coloured, auto).
    #[arg(long, short = 'f', global = true)]
    format: Option<FormatterKind>,

    /// Call-site style (none, short, long).
    #[arg(long, global = true)]
    file: Option<FileStyle>,

    /// Render timestamps in UTC.
    #[arg(long, global = true)]
    utc: bool,

    /// Render timestamps with microseconds.
    #[arg(long, global = true)]
    micros: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one log line.
    ///
    /// Message words are joined with single spaces. A fatal line exits
    /// with code 1 once written.
    Emit {
        /// Severity of the line.
        severity: Level,

        /// Message words.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Write each line read from stdin.
    ///
    /// Fatal lines are written like any other; the command never exits early.
    Pipe {
        /// Severity of every line.
        severity: Level,
    },

    /// Print the resolved configuration as TOML.
    Config {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Config file (or per-user default), then environment, then flags.
    ///
    /// Environment values that fail to parse are reported on stderr and
    /// otherwise ignored.
    fn resolve_config(&self) -> CliResult<LoggerConfig> {
        let base = match &self.config {
            Some(path) => LoggerConfig::load(path)?,
            None => LoggerConfig::discover()?,
        };
        let (mut config, rejected) = base.overlay_env(|key| env::var(key).ok());
        for err in rejected {
            eprintln!("Warning: {err}; ignored");
        }

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(kind) = self.format {
            config.formatter = kind;
        }
        if let Some(style) = self.file {
            config.flags.file = style;
        }
        if self.utc {
            config.flags.utc = true;
        }
        if self.micros {
            config.flags.microseconds = true;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = cli.resolve_config().and_then(|config| match cli.command {
        Commands::Emit { severity, message } => cmd_emit(config, severity, &message),
        Commands::Pipe { severity } => cmd_pipe(config, severity),
        Commands::Config { json } => cmd_config(&config, json),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the process logger and routes the `log` facade through it.
fn install(config: LoggerConfig) -> CliResult<&'static Logger> {
    Ok(config.apply_global().init()?)
}

/// Emit command: Write one line, exiting with 1 for fatal.
fn cmd_emit(config: LoggerConfig, severity: Level, message: &[String]) -> CliResult<()> {
    let logger = install(config)?;
    let words: Vec<&dyn Display> = message.iter().map(|word| word as &dyn Display).collect();

    let wrapper = logger.wrapper(severity);
    if severity == Level::Fatal {
        wrapper.fatalln(&words);
    } else {
        wrapper.println(&words);
    }
    Ok(())
}

/// Pipe command: Write every stdin line at one severity.
fn cmd_pipe(config: LoggerConfig, severity: Level) -> CliResult<()> {
    let logger = install(config)?;
    let wrapper = logger.wrapper(severity);

    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => wrapper.print(&line),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                log::warn!(target: "levelog::cli", "skipping line that is not UTF-8");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Config command: Print the merged configuration.
fn cmd_config(config: &LoggerConfig, json: bool) -> CliResult<()> {
    let text = if json {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    println!("{}", text.trim_end());
    Ok(())
}
