//! Build-time code generation from Glean telemetry schemas.
//!
//! The library loads a Glean metrics schema, emits a C++ header declaring one
//! string constant per sample metric, and drives the external `glean_parser`
//! translator to produce JavaScript bindings for the pings and metrics
//! schemas. Every step is synchronous and every failure is reported through
//! [`Error`].

mod config;
mod error;
mod header;
mod naming;
mod pipeline;
mod schema;
mod translator;

pub use config::{GeneratorConfig, TranslatorSettings};
pub use error::{Error, io_error, output_error};
pub use header::{collect_constants, emit_header, render_header, write_header};
pub use naming::{CamelCase, camelize, validate_identifier};
pub use pipeline::{GenerationReport, generate, generate_header, translate_schemas};
pub use schema::{MetricEntry, SchemaDocument, Section, load_schema, parse_schema};
pub use translator::{GleanParser, Translator, TranslatorError, translate_all};
