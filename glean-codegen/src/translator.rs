#![allow(non_shorthand_field_patterns)]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Invocation of the external `glean_parser` schema translator.
//!
//! The translator turns a schema into JavaScript bindings. It is run as a
//! blocking subprocess with inherited standard streams; there is no retry and
//! no timeout.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, ExitStatus}
};

use tracing::{debug, info, warn};

use crate::config::TranslatorSettings;

const INSTALL_HINT: &str = "Is it installed? Try with:\n\tnpm -g install glean_parser";

/// Failure modes of a translator invocation.
#[derive(Debug, masterror::Error)]
pub enum TranslatorError {
    /// The executable could not be resolved.
    #[error("translator '{program}' was not found")]
    NotFound {
        /// Program name that was looked up.
        program: String
    },
    /// The translator ran and reported failure.
    #[error("translator '{program}' failed for {schema:?}: {status}")]
    Failed {
        /// Program name that was run.
        program: String,
        /// Schema being translated.
        schema:  PathBuf,
        /// Exit status reported by the process.
        status:  ExitStatus
    },
    /// Spawning or waiting for the translator failed for another reason.
    #[error("failed to run translator '{program}': {source}")]
    Io {
        /// Program name that was run.
        program: String,
        /// Underlying I/O error.
        source:  std::io::Error
    }
}

impl TranslatorError {
    /// Remediation text shown alongside any translator failure.
    pub fn hint(&self) -> &'static str {
        INSTALL_HINT
    }
}

/// Converts a schema file into dynamic-language bindings.
pub trait Translator {
    /// Translates the schema at `schema`.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslatorError`] describing why the translation failed.
    fn translate(&self, schema: &Path) -> Result<(), TranslatorError>;
}

/// `glean_parser translate` run as a subprocess.
#[derive(Debug, Clone)]
pub struct GleanParser {
    settings:   TranslatorSettings,
    output_dir: PathBuf
}

impl GleanParser {
    /// Creates a translator writing into `output_dir`.
    pub fn new(settings: TranslatorSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into()
        }
    }

    /// Builds the command line for `schema` without running it.
    pub fn command(&self, schema: &Path) -> Command {
        let mut command = Command::new(&self.settings.program);
        command
            .arg("translate")
            .arg(schema)
            .args(["-f", self.settings.format.as_str()])
            .arg("-o")
            .arg(&self.output_dir)
            .arg("--option")
            .arg(format!("platform={}", self.settings.platform))
            .arg("--option")
            .arg(format!("namespace={}", self.settings.namespace));
        command
    }
}

impl Translator for GleanParser {
    fn translate(&self, schema: &Path) -> Result<(), TranslatorError> {
        let mut command = self.command(schema);
        let args: Vec<String> =
            command.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect();
        debug!(program = %self.settings.program, ?args, "exec");

        let program = self.settings.program.clone();
        let status = command.status().map_err(|source| match source.kind() {
            ErrorKind::NotFound => TranslatorError::NotFound {
                program: program.clone()
            },
            _ => TranslatorError::Io {
                program: program.clone(),
                source
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(TranslatorError::Failed {
                program,
                schema: schema.to_path_buf(),
                status
            })
        }
    }
}

/// Translates each schema in order, stopping at the first failure.
///
/// Returns the schemas that were translated.
///
/// # Errors
///
/// Returns the first [`TranslatorError`]; later schemas are not attempted.
pub fn translate_all<T>(translator: &T, schemas: &[PathBuf]) -> Result<Vec<PathBuf>, TranslatorError>
where
    T: Translator + ?Sized
{
    let mut translated = Vec::with_capacity(schemas.len());
    for schema in schemas {
        info!("Translating {}", schema.display());
        if let Err(error) = translator.translate(schema) {
            warn!("Translation of {} failed: {error}", schema.display());
            return Err(error);
        }
        translated.push(schema.clone());
    }
    Ok(translated)
}
