// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Typed view of a Glean schema file.
//!
//! A schema is a YAML mapping from category (section) names to mappings of
//! metric keys. Keys starting with `$` and the `no_lint` list are document
//! metadata rather than sections. Entry order follows the source document.

use std::{fs, path::Path};

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{self, Error};

const SCHEMA_URI_KEY: &str = "$schema";
const NO_LINT_KEY: &str = "no_lint";

/// Parsed schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    /// Value of the `$schema` key, if present.
    pub schema_uri: Option<String>,
    /// Sections in document order.
    pub sections:   Vec<Section>
}

/// Named group of metric entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Section (category) name.
    pub name:    String,
    /// Entries in document order.
    pub entries: Vec<MetricEntry>
}

/// Single keyed definition inside a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    /// Key as written in the schema.
    pub key:        String,
    /// Raw definition; the generator does not interpret it.
    pub definition: Value
}

impl SchemaDocument {
    /// Looks up a section by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the section is absent.
    pub fn section(&self, name: &str) -> Result<&Section, Error> {
        self.sections
            .iter()
            .find(|section| section.name == name)
            .ok_or_else(|| Error::schema(format!("section '{name}' not found")))
    }
}

impl Section {
    /// Iterates over entry keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

/// Loads a schema from the provided path.
///
/// The existence check runs before any read so a missing schema is reported
/// as [`Error::MissingSchema`] rather than a generic I/O failure.
///
/// # Errors
///
/// Returns [`Error::MissingSchema`] when the file does not exist,
/// [`Error::Io`] when it cannot be read, [`Error::Parse`] for YAML syntax
/// errors and [`Error::Schema`] when the document has an unexpected shape.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use glean_codegen::load_schema;
///
/// # fn main() -> Result<(), glean_codegen::Error> {
/// let schema = load_schema(Path::new("glean/metrics.yaml"))?;
/// for key in schema.section("sample")?.keys() {
///     println!("{key}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_schema(path: &Path) -> Result<SchemaDocument, Error> {
    if !path.is_file() {
        return Err(Error::MissingSchema {
            path: path.to_path_buf()
        });
    }

    debug!("Reading schema from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_schema(&contents)
}

/// Parses a schema from a YAML string.
///
/// # Errors
///
/// Propagates [`Error::Parse`] when the YAML cannot be decoded and
/// [`Error::Schema`] when sections or keys have the wrong type.
pub fn parse_schema(contents: &str) -> Result<SchemaDocument, Error> {
    let root: Value = serde_yaml::from_str(contents)?;
    let mapping = match root {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(Error::schema(format!(
                "expected a mapping at the document root, found {}",
                describe(&other)
            )));
        }
    };

    let mut document = SchemaDocument {
        schema_uri: None,
        sections:   Vec::with_capacity(mapping.len())
    };

    for (key, value) in mapping {
        let name = string_key(&key, "section")?;

        if name == SCHEMA_URI_KEY {
            document.schema_uri = value.as_str().map(str::to_owned);
            continue;
        }
        if name.starts_with('$') || name == NO_LINT_KEY {
            debug!("Skipping schema metadata key {name}");
            continue;
        }

        document.sections.push(parse_section(name, value)?);
    }

    Ok(document)
}

fn parse_section(name: String, value: Value) -> Result<Section, Error> {
    let entries = match value {
        Value::Null => Vec::new(),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, definition)| -> Result<MetricEntry, Error> {
                Ok(MetricEntry {
                    key: string_key(&key, &format!("entry in section '{name}'"))?,
                    definition
                })
            })
            .collect::<Result<Vec<_>, Error>>()?,
        other => {
            return Err(Error::schema(format!(
                "section '{name}' must be a mapping, found {}",
                describe(&other)
            )));
        }
    };

    Ok(Section {
        name,
        entries
    })
}

fn string_key(key: &Value, context: &str) -> Result<String, Error> {
    key.as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::schema(format!("{context} has a non-string key ({})", describe(key))))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value"
    }
}
