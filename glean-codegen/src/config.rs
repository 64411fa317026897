//! Configuration describing where schemas live and where generated sources go.
//!
//! The defaults mirror the layout of a project that keeps its Glean schemas in
//! `glean/` and its generated sources in `glean/generated/`. Every path is
//! resolved against an explicit project root, so the loader and emitter never
//! depend on the process working directory.

use std::{
    fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{self, Error},
    naming::validate_identifier
};

/// Relative location of the metrics schema.
pub const DEFAULT_METRICS_SCHEMA: &str = "glean/metrics.yaml";
/// Relative location of the pings schema.
pub const DEFAULT_PINGS_SCHEMA: &str = "glean/pings.yaml";
/// Relative location of the generated C++ header.
pub const DEFAULT_HEADER_PATH: &str = "glean/generated/gleansample.h";
/// Relative directory receiving the translator output.
pub const DEFAULT_BINDINGS_DIR: &str = "glean/generated";
/// Namespace wrapping the generated constants.
pub const DEFAULT_HEADER_NAMESPACE: &str = "GleanSample";
/// Schema section whose keys become header constants.
pub const DEFAULT_SAMPLE_SECTION: &str = "sample";

const DEFAULT_TRANSLATOR_PROGRAM: &str = "glean_parser";
const DEFAULT_TRANSLATOR_FORMAT: &str = "javascript";
const DEFAULT_TRANSLATOR_PLATFORM: &str = "qt";
const DEFAULT_TRANSLATOR_NAMESPACE: &str = "RealGlean";

/// Settings for the whole generation run.
///
/// Relative paths are interpreted against [`root`](Self::root). Fields missing
/// from a YAML configuration file fall back to their defaults.
///
/// # Examples
///
/// ```
/// use glean_codegen::GeneratorConfig;
///
/// let yaml = r#"
/// header_namespace: Telemetry
/// translator:
///   platform: webext
/// "#;
/// let config: GeneratorConfig = serde_yaml::from_str(yaml).expect("valid configuration");
/// assert_eq!(config.header_namespace, "Telemetry");
/// assert_eq!(config.translator.program, "glean_parser");
/// assert_eq!(config.translator.platform, "webext");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Project root every relative path is joined onto.
    #[serde(skip)]
    pub root:             PathBuf,
    /// Metrics schema consumed by both the emitter and the translator.
    pub metrics_schema:   PathBuf,
    /// Pings schema consumed by the translator only.
    pub pings_schema:     PathBuf,
    /// Generated C++ header.
    pub header_path:      PathBuf,
    /// Namespace wrapping the header constants.
    pub header_namespace: String,
    /// Schema section whose keys become constants.
    pub sample_section:   String,
    /// Directory receiving translator output.
    pub bindings_dir:     PathBuf,
    /// Options forwarded to the external translator.
    pub translator:       TranslatorSettings
}

/// Options forwarded to `glean_parser translate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorSettings {
    /// Executable name, resolved through `PATH`.
    pub program:   String,
    /// Output format passed with `-f`.
    pub format:    String,
    /// Value of the `platform` option.
    pub platform:  String,
    /// Value of the `namespace` option.
    pub namespace: String
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root:             PathBuf::from("."),
            metrics_schema:   PathBuf::from(DEFAULT_METRICS_SCHEMA),
            pings_schema:     PathBuf::from(DEFAULT_PINGS_SCHEMA),
            header_path:      PathBuf::from(DEFAULT_HEADER_PATH),
            header_namespace: DEFAULT_HEADER_NAMESPACE.to_owned(),
            sample_section:   DEFAULT_SAMPLE_SECTION.to_owned(),
            bindings_dir:     PathBuf::from(DEFAULT_BINDINGS_DIR),
            translator:       TranslatorSettings::default()
        }
    }
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            program:   DEFAULT_TRANSLATOR_PROGRAM.to_owned(),
            format:    DEFAULT_TRANSLATOR_FORMAT.to_owned(),
            platform:  DEFAULT_TRANSLATOR_PLATFORM.to_owned(),
            namespace: DEFAULT_TRANSLATOR_NAMESPACE.to_owned()
        }
    }
}

impl GeneratorConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Loads a YAML configuration file and roots it at `root`.
    ///
    /// A relative `path` is resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Config`] when it does not match the expected shape.
    pub fn load(root: &Path, path: &Path) -> Result<Self, Error> {
        let location = root.join(path);
        let contents =
            fs::read_to_string(&location).map_err(|source| error::io_error(&location, source))?;
        let mut config: Self = serde_yaml::from_str(&contents).map_err(|source| {
            Error::config(format!("{}: {source}", location.display()))
        })?;
        config.root = root.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Joins `path` onto the root unless it is already absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute or root-relative location of the metrics schema.
    pub fn metrics_schema_path(&self) -> PathBuf {
        self.resolve(&self.metrics_schema)
    }

    /// Absolute or root-relative location of the pings schema.
    pub fn pings_schema_path(&self) -> PathBuf {
        self.resolve(&self.pings_schema)
    }

    /// Absolute or root-relative location of the generated header.
    pub fn header_output_path(&self) -> PathBuf {
        self.resolve(&self.header_path)
    }

    /// Absolute or root-relative translator output directory.
    pub fn bindings_output_dir(&self) -> PathBuf {
        self.resolve(&self.bindings_dir)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.header_namespace.trim().is_empty() {
            return Err(Error::config("header_namespace must not be empty"));
        }
        validate_identifier(&self.header_namespace)
            .map_err(|reason| Error::config(format!("header_namespace: {reason}")))?;
        if self.sample_section.trim().is_empty() {
            return Err(Error::config("sample_section must not be empty"));
        }
        if self.translator.program.trim().is_empty() {
            return Err(Error::config("translator.program must not be empty"));
        }
        Ok(())
    }
}
