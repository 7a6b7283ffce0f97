//! DCL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DistcleanError>;

/// Top-level error type for distclean.
///
/// These cover the supplemental surface only (configuration loading, output
/// encoding). The sweep itself never returns an error: per-file failures are
/// recorded in the report and the run keeps going.
#[derive(Debug, Error)]
pub enum DistcleanError {
    #[error("[DCL-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DCL-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[DCL-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DCL-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[DCL-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DistcleanError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "DCL-1001",
            Self::MissingConfig { .. } => "DCL-1002",
            Self::ConfigParse { .. } => "DCL-1003",
            Self::Serialization { .. } => "DCL-2101",
            Self::Io { .. } => "DCL-3002",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for DistcleanError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DistcleanError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
