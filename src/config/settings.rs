//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.
//! Every field is optional; an empty object yields the defaults.

use std::path::PathBuf;

use serde::Deserialize;

use super::{ConfigError, ConfigResult};
use crate::kicad::FootprintLibrary;

/// Log levels accepted in `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory the generated files are written to.
    /// Default: the current directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Footprint library table entry.
    #[serde(default)]
    pub footprint_library: LibraryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> ConfigResult<()> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_field(
                "logging.level",
                format!(
                    "is '{}', expected one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.footprint_library.name.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "footprint_library.name",
                "must not be empty",
            ));
        }
        if self.footprint_library.uri.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "footprint_library.uri",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Footprint library table entry for the custom footprints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library nickname.
    /// Default: "mixtee-footprints"
    #[serde(default = "default_library_name")]
    pub name: String,

    /// Library location.
    /// Default: "${KIPRJMOD}/../lib/mixtee-footprints.pretty"
    #[serde(default = "default_library_uri")]
    pub uri: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
            uri: default_library_uri(),
        }
    }
}

impl LibraryConfig {
    /// The table entry this configuration describes.
    #[must_use]
    pub fn to_library(&self) -> FootprintLibrary {
        FootprintLibrary::new(&self.name, &self.uri)
    }
}

fn default_library_name() -> String {
    "mixtee-footprints".to_string()
}

fn default_library_uri() -> String {
    "${KIPRJMOD}/../lib/mixtee-footprints.pretty".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
