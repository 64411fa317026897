#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

use crate::translator::TranslatorError;

/// Unified error type returned by the schema loader, emitter, translator
/// invocation and CLI.
///
/// Every variant is fatal for a generation run. Variants carry the failing
/// path or the underlying cause so the binary can print an actionable
/// diagnostic before exiting with a non-zero status.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The metrics schema does not exist at the configured location.
    #[error("unable to find schema file {path:?}")]
    MissingSchema {
        /// Location that was checked.
        path: PathBuf
    },
    /// Wraps I/O errors that occur while reading schema or config files.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Location of the file being read.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse YAML: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// The schema decoded as YAML but does not have the expected shape.
    #[error("invalid schema: {message}")]
    Schema {
        /// Human readable description of the shape problem.
        message: String
    },
    /// Generated identifiers violate naming invariants.
    #[error("invalid identifiers: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps I/O errors that occur while writing the generated header.
    #[error("failed to write generated file {path:?}: {source}")]
    Output {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// The generator configuration file is unusable.
    #[error("invalid configuration: {message}")]
    Config {
        /// Human readable message describing the configuration problem.
        message: String
    },
    /// Wraps serialization errors when writing the JSON report.
    #[error("failed to serialize report: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// The external schema translator failed.
    #[error("{source}")]
    Translator {
        /// Cause reported by the invocation.
        source: TranslatorError
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a schema shape error from the provided displayable value.
    pub fn schema<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Schema {
            message: message.into()
        }
    }

    /// Constructs a configuration error from the provided displayable value.
    pub fn config<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Config {
            message: message.into()
        }
    }

    /// Remediation hint printed after the error, when one exists.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Translator {
                source
            } => Some(source.hint()),
            _ => None
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<TranslatorError> for Error {
    fn from(source: TranslatorError) -> Self {
        Self::Translator {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Output`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the generated file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn output_error(path: &Path, source: std::io::Error) -> Error {
    Error::Output {
        path: path.to_path_buf(),
        source
    }
}
