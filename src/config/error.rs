//! Errors raised while loading the configuration file.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or checking the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file {path} does not exist")]
    Missing {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// The config file exists but could not be read.
    #[error("cannot read config file {path}")]
    Unreadable {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the expected layout.
    #[error("config file {path} is malformed")]
    Malformed {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying JSON error (position and unknown field names).
        #[source]
        source: serde_json::Error,
    },

    /// A field parsed but holds an unusable value.
    #[error("config field `{field}` {reason}")]
    InvalidField {
        /// Dotted field path, e.g. `logging.level`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigError::Missing {
            path: PathBuf::from("/boards/mixtee.json"),
        };
        assert_eq!(
            error.to_string(),
            "config file /boards/mixtee.json does not exist"
        );
    }

    #[test]
    fn unreadable_file_keeps_io_source() {
        let error = ConfigError::Unreadable {
            path: PathBuf::from("config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().starts_with("cannot read"));
        assert_eq!(error.source().unwrap().to_string(), "denied");
    }

    #[test]
    fn invalid_field_names_the_field() {
        let error = ConfigError::invalid_field("footprint_library.uri", "must not be empty");
        assert_eq!(
            error.to_string(),
            "config field `footprint_library.uri` must not be empty"
        );
    }
}
