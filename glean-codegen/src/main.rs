//! Command-line interface for the glean-codegen binary.
//!
//! Without a subcommand the binary performs the full generation run: the C++
//! sample header followed by the pings and metrics JavaScript bindings.
//! Subcommands allow running the header or translator steps on their own.

use std::{
    io,
    path::{Path, PathBuf},
    process
};

use clap::{ArgAction, Args, Parser, Subcommand};
use glean_codegen::{
    Error, GenerationReport, GeneratorConfig, GleanParser, generate, generate_header,
    translate_schemas
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command line interface for generating Glean sample constants and bindings.
#[derive(Debug, Parser)]
#[command(
    name = "glean-codegen",
    version,
    about = "Generate C++ sample constants and JavaScript bindings from Glean schemas"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    common: CommonArgs
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Emit the header and translate both schemas (default).
    All,
    /// Emit the C++ sample header only.
    Header,
    /// Run the schema translator for the pings and metrics schemas only.
    Translate
}

/// Options shared by every command.
#[derive(Debug, Args)]
struct CommonArgs {
    /// Project root that schema and output paths are resolved against.
    #[arg(long = "root", value_name = "DIR", default_value = ".", global = true)]
    root: PathBuf,

    /// Optional YAML file overriding the default layout, relative to the root.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Translator executable used instead of `glean_parser`.
    #[arg(long = "translator", value_name = "PROGRAM", env = "GLEAN_PARSER", global = true)]
    translator: Option<String>,

    /// Print a JSON report of the generated artifacts to stdout.
    #[arg(long = "json", action = ArgAction::SetTrue, global = true)]
    json: bool,

    /// Log debug output unless RUST_LOG says otherwise.
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, global = true)]
    verbose: bool
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("{}", error.to_display_string());
        if let Some(hint) = error.hint() {
            eprintln!("{hint}");
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

/// Executes the CLI and prints the report when requested.
///
/// # Errors
///
/// Propagates configuration, generation and serialization errors.
fn run(cli: &Cli) -> Result<(), Error> {
    let report = execute(cli)?;

    if cli.common.json {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_report(&mut handle, &report)?;
    }

    Ok(())
}

fn execute(cli: &Cli) -> Result<GenerationReport, Error> {
    let config = build_config(&cli.common)?;
    let translator = GleanParser::new(config.translator.clone(), config.bindings_output_dir());

    match cli.command.as_ref().unwrap_or(&Command::All) {
        Command::All => generate(&config, &translator),
        Command::Header => generate_header(&config),
        Command::Translate => translate_schemas(&config, &translator)
    }
}

fn build_config(args: &CommonArgs) -> Result<GeneratorConfig, Error> {
    let mut config = match args.config.as_deref() {
        Some(path) => GeneratorConfig::load(&args.root, path)?,
        None => GeneratorConfig::with_root(&args.root)
    };

    if let Some(program) = args.translator.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        config.translator.program = program.to_owned();
    }

    Ok(config)
}

fn write_report<W: io::Write>(writer: &mut W, report: &GenerationReport) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer).map_err(|source| glean_codegen::output_error(Path::new("<stdout>"), source))
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor, path::Path};

    use clap::Parser;
    use glean_codegen::{Error, GenerationReport};
    use tempfile::tempdir;

    use super::{Cli, Command, build_config, execute, write_report};

    #[test]
    fn cli_defaults_to_full_run_in_current_directory() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME")]).expect("failed to parse CLI");

        assert!(cli.command.is_none());
        assert_eq!(cli.common.root, Path::new("."));
        assert!(cli.common.config.is_none());
        assert!(!cli.common.json);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "header",
            "--root",
            "/project",
            "--json"
        ])
        .expect("failed to parse CLI");

        assert!(matches!(cli.command, Some(Command::Header)));
        assert_eq!(cli.common.root, Path::new("/project"));
        assert!(cli.common.json);
    }

    #[test]
    fn translator_flag_overrides_program() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--root",
            "/project",
            "--translator",
            "/opt/bin/glean_parser"
        ])
        .expect("failed to parse CLI");

        let config = build_config(&cli.common).expect("config builds");
        assert_eq!(config.translator.program, "/opt/bin/glean_parser");
        assert_eq!(config.metrics_schema_path(), Path::new("/project/glean/metrics.yaml"));
    }

    #[test]
    fn header_command_writes_header_only() {
        let temp = tempdir().expect("failed to create tempdir");
        fs::create_dir_all(temp.path().join("glean/generated")).expect("failed to create dirs");
        fs::write(temp.path().join("glean/metrics.yaml"), "sample:\n  vpn_on: {}\n")
            .expect("failed to write metrics");

        let root = temp.path().to_str().expect("utf8");
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "header", "--root", root])
            .expect("failed to parse CLI");

        let report = execute(&cli).expect("header generation failed");
        assert_eq!(report.constants, ["vpnOn"]);
        assert!(report.translated.is_empty());

        let header = fs::read_to_string(temp.path().join("glean/generated/gleansample.h"))
            .expect("header exists");
        assert!(header.contains("constexpr const char* vpnOn = \"vpnOn\";"));
    }

    #[test]
    fn missing_schema_fails_without_output() {
        let temp = tempdir().expect("failed to create tempdir");
        fs::create_dir_all(temp.path().join("glean/generated")).expect("failed to create dirs");

        let root = temp.path().to_str().expect("utf8");
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--root", root])
            .expect("failed to parse CLI");

        let error = execute(&cli).expect_err("missing schema accepted");
        assert!(matches!(error, Error::MissingSchema { .. }));
        assert!(!temp.path().join("glean/generated/gleansample.h").exists());
    }

    #[test]
    fn missing_translator_reports_install_hint() {
        let temp = tempdir().expect("failed to create tempdir");
        let root = temp.path().to_str().expect("utf8");
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "translate",
            "--root",
            root,
            "--translator",
            "glean-codegen-definitely-missing-translator"
        ])
        .expect("failed to parse CLI");

        let error = execute(&cli).expect_err("missing translator accepted");
        assert!(matches!(error, Error::Translator { .. }));
        assert!(error.hint().is_some_and(|hint| hint.contains("npm -g install glean_parser")));
    }

    #[test]
    fn report_is_written_as_pretty_json() {
        let report = GenerationReport {
            constants: vec!["firstEvent".to_owned()],
            ..GenerationReport::default()
        };
        let mut buffer = Cursor::new(Vec::new());
        write_report(&mut buffer, &report).expect("failed to write report");

        let output = String::from_utf8(buffer.into_inner()).expect("invalid UTF-8");
        assert_eq!(output, "{\n  \"constants\": [\n    \"firstEvent\"\n  ],\n  \"translated\": []\n}\n");
    }
}
