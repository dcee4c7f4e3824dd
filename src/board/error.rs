//! Error types for board generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::nets::NetCode;

/// Result type for board generation.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur while assembling or writing a board.
///
/// Every variant except [`BoardError::FileWrite`] is raised before any file
/// is touched; the geometry and net variants indicate a mistake in the static
/// board definition.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A pad or copper zone references a net code that is not registered.
    #[error("Unknown net code {code}{}", context_suffix(.context))]
    UnknownNet {
        /// The unregistered net code.
        code: NetCode,
        /// Where the code was referenced (e.g. "U1 pad 12").
        context: Option<String>,
    },

    /// A net code was registered twice with different names.
    #[error("Net code {code} already registered as '{existing}', cannot register '{requested}'")]
    DuplicateNetCode {
        /// The conflicting code.
        code: NetCode,
        /// Name already bound to the code.
        existing: String,
        /// Name that was requested.
        requested: String,
    },

    /// A pad carries a net name that differs from the board's net table.
    #[error("Net code {code} is '{expected}' on this board, but {context} was placed as '{found}'")]
    NetNameMismatch {
        /// The net code.
        code: NetCode,
        /// Name in the board's net table.
        expected: String,
        /// Name stored on the pad.
        found: String,
        /// The offending pad (e.g. "C1 pad 1").
        context: String,
    },

    /// A daisy chain cannot be built or does not cover every instance.
    #[error("Invalid chain: {message}")]
    InvalidChain {
        /// Description of what's wrong.
        message: String,
    },

    /// Two placements share a reference designator.
    #[error("Duplicate reference designator: {reference}")]
    DuplicateReference {
        /// The repeated reference.
        reference: String,
    },

    /// A net assignment names a pad the footprint does not have.
    #[error("Footprint {footprint} ({reference}) has no pad '{pad}'")]
    UnknownPad {
        /// Reference designator of the placement.
        reference: String,
        /// Footprint library identifier.
        footprint: String,
        /// The unknown pad name.
        pad: String,
    },

    /// Board or placement geometry is out of range.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of what's wrong.
        message: String,
    },

    /// Project settings could not be serialised.
    #[error("Failed to serialise project settings")]
    Serialization {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_ref()
        .map_or_else(String::new, |c| format!(" (referenced by {c})"))
}

impl BoardError {
    /// Creates an unknown net error without reference context.
    #[must_use]
    pub const fn unknown_net(code: NetCode) -> Self {
        Self::UnknownNet {
            code,
            context: None,
        }
    }

    /// Attaches reference context to an [`BoardError::UnknownNet`]; other
    /// variants pass through unchanged.
    #[must_use]
    pub fn referenced_by(self, what: impl Into<String>) -> Self {
        match self {
            Self::UnknownNet { code, .. } => Self::UnknownNet {
                code,
                context: Some(what.into()),
            },
            other => other,
        }
    }

    /// Creates a duplicate reference error.
    pub fn duplicate_reference(reference: impl Into<String>) -> Self {
        Self::DuplicateReference {
            reference: reference.into(),
        }
    }

    /// Creates an unknown pad error.
    pub fn unknown_pad(
        reference: impl Into<String>,
        footprint: impl Into<String>,
        pad: impl Into<String>,
    ) -> Self {
        Self::UnknownPad {
            reference: reference.into(),
            footprint: footprint.into(),
            pad: pad.into(),
        }
    }

    /// Creates an invalid geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid chain error.
    pub fn invalid_chain(message: impl Into<String>) -> Self {
        Self::InvalidChain {
            message: message.into(),
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
