// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! End-to-end generation run.
//!
//! Steps run sequentially and every failure is fatal: the metrics schema is
//! loaded, the sample header is written, and the translator is run for the
//! pings schema and then the metrics schema.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::{
    config::GeneratorConfig,
    error::Error,
    header::emit_header,
    schema::load_schema,
    translator::{Translator, translate_all}
};

/// Summary of what a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Header that was written, if the header step ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header:     Option<PathBuf>,
    /// Constants emitted into the header, in order.
    pub constants:  Vec<String>,
    /// Schemas handed to the translator successfully, in order.
    pub translated: Vec<PathBuf>
}

/// Loads the metrics schema and writes the sample header.
///
/// # Errors
///
/// Returns [`Error::MissingSchema`] before anything is written when the
/// metrics schema is absent, and propagates parse, validation and output
/// errors.
pub fn generate_header(config: &GeneratorConfig) -> Result<GenerationReport, Error> {
    let schema_path = config.metrics_schema_path();
    info!("Parsing the metrics schema {}...", schema_path.display());
    let schema = load_schema(&schema_path)?;
    let section = schema.section(&config.sample_section)?;

    info!("Generating the C++ header...");
    let header_path = config.header_output_path();
    let constants = emit_header(section, &config.header_namespace, &header_path)?;

    Ok(GenerationReport {
        header: Some(header_path),
        constants,
        translated: Vec::new()
    })
}

/// Runs the translator for the pings schema and then the metrics schema.
///
/// # Errors
///
/// Returns [`Error::Translator`] for the first failing schema; the metrics
/// schema is not attempted when the pings schema fails.
pub fn translate_schemas<T>(config: &GeneratorConfig, translator: &T) -> Result<GenerationReport, Error>
where
    T: Translator + ?Sized
{
    info!("Generating the ping and sample JS modules...");
    let schemas = [config.pings_schema_path(), config.metrics_schema_path()];
    let translated = translate_all(translator, &schemas)?;

    Ok(GenerationReport {
        translated,
        ..GenerationReport::default()
    })
}

/// Runs the full generation: header first, then both translations.
///
/// # Errors
///
/// Propagates the first error from [`generate_header`] or
/// [`translate_schemas`].
pub fn generate<T>(config: &GeneratorConfig, translator: &T) -> Result<GenerationReport, Error>
where
    T: Translator + ?Sized
{
    let mut report = generate_header(config)?;
    report.translated = translate_schemas(config, translator)?.translated;
    info!(
        "Generated {} constants and translated {} schemas",
        report.constants.len(),
        report.translated.len()
    );
    Ok(report)
}
