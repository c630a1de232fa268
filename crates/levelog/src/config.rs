//! Centralized configuration for levelog loggers.
//!
//! `LoggerConfig` gathers the threshold, formatter choice and header flags in
//! one place, and can be filled from a TOML file, from environment
//! variables, or programmatically.
//!
//! ```toml
//! level = "warning"
//! formatter = "coloured"
//!
//! [flags]
//! utc = true
//! file = "long"
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::formatter::FormatterKind;
use crate::line::{FileStyle, Flags};
use crate::logger::{Logger, LoggerBuilder};
use crate::{Level, Threshold};

/// Environment variable holding the threshold level.
pub const LEVEL_VAR: &str = "LEVELOG_LEVEL";
/// Environment variable holding the formatter kind.
pub const FORMAT_VAR: &str = "LEVELOG_FORMAT";
/// Environment variable holding the call-site style.
pub const FILE_VAR: &str = "LEVELOG_FILE";
/// Environment variable switching timestamps to UTC.
pub const UTC_VAR: &str = "LEVELOG_UTC";

/// Logger settings that can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Minimum level written.
    pub level: Level,
    /// Formatter selection.
    pub formatter: FormatterKind,
    /// Line header options.
    pub flags: Flags,
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(target: "levelog::config", "loaded config from {}", path.display());
        Ok(config)
    }

    /// Per-user config file location, e.g. `~/.config/levelog/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("levelog").join("config.toml"))
    }

    /// Load the per-user config file if it exists, defaults otherwise.
    pub fn discover() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `LEVELOG_LEVEL` | debug/info/warning/error/fatal | Threshold |
    /// | `LEVELOG_FORMAT` | plain/coloured/auto | Formatter |
    /// | `LEVELOG_FILE` | none/short/long | Call-site style |
    /// | `LEVELOG_UTC` | 0/1 | UTC timestamps |
    /// | `NO_COLOR` | (set, non-empty) | Plain output unless `LEVELOG_FORMAT` is set |
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| env::var(key).ok())
    }

    /// Overlay environment settings read through `lookup`.
    ///
    /// Unrecognised values are skipped with a warning on the `log` facade.
    #[must_use]
    pub fn apply_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (config, rejected) = self.overlay_env(lookup);
        for err in rejected {
            log::warn!(target: "levelog::config", "{err}; ignored");
        }
        config
    }

    /// Overlay environment settings read through `lookup`, handing back the
    /// values that were rejected instead of logging them.
    ///
    /// Each rejected value is a [`ConfigError::InvalidValue`] keyed by the
    /// variable name; the setting it would have changed keeps its prior value.
    #[must_use]
    pub fn overlay_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, Vec<ConfigError>) {
        let mut rejected = Vec::new();

        if let Some(value) = lookup(LEVEL_VAR) {
            match value.parse::<Level>() {
                Ok(level) => self.level = level,
                Err(e) => rejected.push(ConfigError::invalid_value(LEVEL_VAR, e)),
            }
        }

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.formatter = FormatterKind::Plain;
        }
        if let Some(value) = lookup(FORMAT_VAR) {
            match value.parse::<FormatterKind>() {
                Ok(kind) => self.formatter = kind,
                Err(e) => rejected.push(ConfigError::invalid_value(FORMAT_VAR, e)),
            }
        }

        if let Some(value) = lookup(FILE_VAR) {
            match value.parse::<FileStyle>() {
                Ok(style) => self.flags.file = style,
                Err(e) => rejected.push(ConfigError::invalid_value(FILE_VAR, e)),
            }
        }

        if let Some(value) = lookup(UTC_VAR) {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.flags.utc = true,
                "0" | "false" | "no" => self.flags.utc = false,
                _ => rejected.push(ConfigError::invalid_value(
                    UTC_VAR,
                    format!("{value}. Expected: 0, 1, true, false"),
                )),
            }
        }

        (self, rejected)
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the threshold level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the formatter kind
    #[must_use]
    pub fn with_formatter(mut self, kind: FormatterKind) -> Self {
        self.formatter = kind;
        self
    }

    /// Set the header flags
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution Methods
    // ─────────────────────────────────────────────────

    /// A logger builder with a private threshold starting at `level`.
    #[must_use]
    pub fn into_builder(self) -> LoggerBuilder {
        Logger::builder()
            .formatter(self.formatter.resolve())
            .flags(self.flags)
            .threshold(Threshold::new(self.level))
    }

    /// Set the process-wide threshold to `level` and return a builder bound
    /// to it.
    #[must_use]
    pub fn apply_global(self) -> LoggerBuilder {
        crate::set_level(self.level);
        Logger::builder()
            .formatter(self.formatter.resolve())
            .flags(self.flags)
            .threshold(Threshold::global())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::new();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.formatter, FormatterKind::Auto);
        assert_eq!(config.flags, Flags::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfig::new()
            .with_level(Level::Error)
            .with_formatter(FormatterKind::Plain)
            .with_flags(Flags::empty());
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.formatter, FormatterKind::Plain);
        assert_eq!(config.flags, Flags::empty());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = LoggerConfig::from_toml_str(
            r#"
            level = "warn"
            formatter = "colored"

            [flags]
            date = false
            time = true
            microseconds = true
            utc = true
            file = "long"
            msg_prefix = true
            "#,
        )
        .unwrap();
        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.formatter, FormatterKind::Coloured);
        assert!(!config.flags.date);
        assert!(config.flags.microseconds);
        assert!(config.flags.utc);
        assert_eq!(config.flags.file, FileStyle::Long);
        assert!(config.flags.msg_prefix);
    }

    #[test]
    fn test_partial_flags_keep_defaults() {
        let config = LoggerConfig::from_toml_str("[flags]\nutc = true\n").unwrap();
        assert!(config.flags.utc);
        assert!(config.flags.date);
        assert!(config.flags.time);
        assert_eq!(config.flags.file, FileStyle::Short);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(LoggerConfig::from_toml_str("").unwrap(), LoggerConfig::default());
    }

    #[test]
    fn test_bad_level_is_parse_error() {
        let err = LoggerConfig::from_toml_str("level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = LoggerConfig::from_toml_str("colour = true").unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_serialize_round_trips_through_toml() {
        let config = LoggerConfig::new().with_level(Level::Fatal);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("level = \"fatal\""));
        assert_eq!(LoggerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = \"debug\"").unwrap();
        let config = LoggerConfig::load(file.path()).unwrap();
        assert_eq!(config.level, Level::Debug);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = LoggerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_apply_env_overrides() {
        let config = LoggerConfig::new().apply_env(lookup(&[
            (LEVEL_VAR, "error"),
            (FORMAT_VAR, "plain"),
            (FILE_VAR, "long"),
            (UTC_VAR, "1"),
        ]));
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.formatter, FormatterKind::Plain);
        assert_eq!(config.flags.file, FileStyle::Long);
        assert!(config.flags.utc);
    }

    #[test]
    fn test_apply_env_ignores_bad_values() {
        let config = LoggerConfig::new().apply_env(lookup(&[
            (LEVEL_VAR, "shouting"),
            (FORMAT_VAR, "rainbow"),
            (UTC_VAR, "maybe"),
        ]));
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_overlay_env_reports_rejected_keys() {
        let (config, rejected) = LoggerConfig::new()
            .with_level(Level::Warning)
            .overlay_env(lookup(&[
                (LEVEL_VAR, "shouting"),
                (FORMAT_VAR, "plain"),
                (FILE_VAR, "sideways"),
                (UTC_VAR, "maybe"),
            ]));

        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.formatter, FormatterKind::Plain);
        assert_eq!(config.flags.file, FileStyle::Short);

        let keys: Vec<&str> = rejected
            .iter()
            .map(|err| match err {
                ConfigError::InvalidValue { key, .. } => key.as_str(),
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(keys, vec![LEVEL_VAR, FILE_VAR, UTC_VAR]);
        assert!(rejected[0].to_string().contains("shouting"));
        assert!(rejected[2].to_string().starts_with("Invalid value for LEVELOG_UTC: maybe"));
    }

    #[test]
    fn test_overlay_env_accepts_clean_values() {
        let (_, rejected) = LoggerConfig::new().overlay_env(lookup(&[(LEVEL_VAR, "Error")]));
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_toml_values_parse_like_env_values() {
        let config = LoggerConfig::from_toml_str(
            r#"
            level = "INFO"
            formatter = "Colored"
            [flags]
            file = "FULL"
            "#,
        )
        .unwrap();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.formatter, FormatterKind::Coloured);
        assert_eq!(config.flags.file, FileStyle::Long);

        let config = LoggerConfig::from_toml_str("level = \"trace\"").unwrap();
        assert_eq!(config.level, Level::Debug);
    }

    #[test]
    fn test_bad_toml_value_names_input() {
        let err = LoggerConfig::from_toml_str("formatter = \"rainbow\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("rainbow"));
    }

    #[test]
    fn test_no_color_forces_plain() {
        let config = LoggerConfig::new().apply_env(lookup(&[("NO_COLOR", "1")]));
        assert_eq!(config.formatter, FormatterKind::Plain);
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        let config = LoggerConfig::new().apply_env(lookup(&[("NO_COLOR", "")]));
        assert_eq!(config.formatter, FormatterKind::Auto);
    }

    #[test]
    fn test_explicit_format_beats_no_color() {
        let config = LoggerConfig::new().apply_env(lookup(&[
            ("NO_COLOR", "1"),
            (FORMAT_VAR, "coloured"),
        ]));
        assert_eq!(config.formatter, FormatterKind::Coloured);
    }

    #[test]
    fn test_into_builder_uses_private_threshold() {
        let logger = LoggerConfig::new()
            .with_level(Level::Error)
            .with_formatter(FormatterKind::Plain)
            .into_builder()
            .stdout(std::io::sink())
            .stderr(std::io::sink())
            .build();
        assert_eq!(logger.threshold().get(), Level::Error);
        assert!(!logger.threshold().same_cell(&Threshold::global()));
    }

    #[test]
    fn test_default_path_ends_with_crate_dir() {
        if let Some(path) = LoggerConfig::default_path() {
            assert!(path.ends_with("levelog/config.toml"));
        }
    }
}
