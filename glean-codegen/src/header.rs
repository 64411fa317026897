// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! C++ header emitter for sample metric names.
//!
//! Every key of the sample section becomes a
//! `constexpr const char* name = "name";` declaration inside a namespace, so
//! C++ callers can refer to metrics by constant instead of by string literal.

use std::{collections::HashMap, fs, path::Path};

use tracing::{debug, info};

use crate::{
    error::{self, Error},
    naming::{camelize, validate_identifier},
    schema::Section
};

const LICENSE_BANNER: &str = "/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */";

const GENERATED_WARNING: &str = "// AUTOGENERATED! DO NOT EDIT!!";

/// Camel-cases every key of `section` in document order.
///
/// # Errors
///
/// Returns [`Error::Validation`] when a generated identifier is not a valid
/// C++ identifier or when two keys produce the same identifier.
///
/// # Examples
///
/// ```
/// use glean_codegen::{collect_constants, parse_schema};
///
/// let schema = parse_schema("sample:\n  first_event: {}\n  second_event: {}\n").unwrap();
/// let constants = collect_constants(schema.section("sample").unwrap()).unwrap();
/// assert_eq!(constants, ["firstEvent", "secondEvent"]);
/// ```
pub fn collect_constants(section: &Section) -> Result<Vec<String>, Error> {
    let mut constants = Vec::with_capacity(section.entries.len());
    let mut origins: HashMap<String, &str> = HashMap::with_capacity(section.entries.len());

    for key in section.keys() {
        let identifier = camelize(key);
        validate_identifier(&identifier).map_err(|reason| {
            Error::validation(format!("key '{key}' in section '{}': {reason}", section.name))
        })?;

        if let Some(previous) = origins.insert(identifier.clone(), key) {
            return Err(Error::validation(format!(
                "keys '{previous}' and '{key}' in section '{}' both map to '{identifier}'",
                section.name
            )));
        }

        debug!("{key} -> {identifier}");
        constants.push(identifier);
    }

    Ok(constants)
}

/// Renders the header text for `constants` wrapped in `namespace`.
///
/// The output is a pure function of its inputs, so unchanged schemas produce
/// byte-identical headers.
pub fn render_header(namespace: &str, constants: &[String]) -> String {
    use std::fmt::Write as _;

    let mut buffer = String::with_capacity(256 + constants.len() * 64);
    let _ = write!(buffer, "{LICENSE_BANNER}\n\n{GENERATED_WARNING}\n\nnamespace {namespace} {{\n\n");
    for constant in constants {
        let _ = writeln!(buffer, "constexpr const char* {constant} = \"{constant}\";");
    }
    let _ = writeln!(buffer, "\n}} // {namespace}");

    buffer
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory is expected to exist already.
///
/// # Errors
///
/// Returns [`Error::Output`] when the file cannot be created or written.
pub fn write_header(path: &Path, contents: &str) -> Result<(), Error> {
    info!("Writing C++ header to {}", path.display());
    fs::write(path, contents).map_err(|source| error::output_error(path, source))
}

/// Collects, renders and writes the header for `section`.
///
/// Returns the emitted constant names.
///
/// # Errors
///
/// Propagates errors from [`collect_constants`] and [`write_header`]. Nothing
/// is written when identifier collection fails.
pub fn emit_header(section: &Section, namespace: &str, path: &Path) -> Result<Vec<String>, Error> {
    let constants = collect_constants(section)?;
    let contents = render_header(namespace, &constants);
    write_header(path, &contents)?;
    info!("Emitted {} constants into namespace {namespace}", constants.len());
    Ok(constants)
}
