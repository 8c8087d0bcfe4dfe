//! Command-line interface for sqlfluent
//!
//! Compiles a query file into a JavaScript program and its source map.
//!
//! Usage:
//!   sqlfluent `<path>` [--config `<file>`] [--format `<format>`] [--out-dir `<dir>`]
//!             [--recover] [--best-effort] [--emit-runtime]
//!
//! With the default `auto` format the program and `<program>.map` are written next to the
//! input (or into `--out-dir`) and the program is printed. Any other format only prints.
//! Diagnostics go to stderr, one per line, and make the process exit with status 1.

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use sqlfluent::sqlfluent::formats::{self, FormatError, OutputFormat};
use sqlfluent::{CompileOutput, Compiler, Loader};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Configuration file picked up from the working directory when present
const LOCAL_CONFIG: &str = "sqlfluent.toml";

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("sqlfluent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile SELECT queries into a fluent query-builder program with a source map")
        .arg(
            Arg::new("path")
                .help("Path to the query file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("What to print")
                .value_parser([
                    "auto",
                    "source",
                    "map",
                    "tokens-json",
                    "ast-json",
                    "ast-treeviz",
                ])
                .default_value("auto"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('o')
                .value_name("DIR")
                .help("Where the auto format writes its files (default: next to the input)"),
        )
        .arg(
            Arg::new("recover")
                .long("recover")
                .action(ArgAction::SetTrue)
                .help("Keep parsing after a broken line and report every one"),
        )
        .arg(
            Arg::new("best-effort")
                .long("best-effort")
                .action(ArgAction::SetTrue)
                .help("Keep partial output when some nodes cannot be generated"),
        )
        .arg(
            Arg::new("emit-runtime")
                .long("emit-runtime")
                .action(ArgAction::SetTrue)
                .help("Prepend the QueryBuilder class to the generated program"),
        )
}

fn load_config(matches: &ArgMatches, input: &Path) -> Result<sqlfluent::CompilerConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("recover") {
        loader = loader.set_override("parsing.recovery", "resync")?;
    }
    if matches.get_flag("best-effort") {
        loader = loader.set_override("generation.mode", "best-effort")?;
    }
    if matches.get_flag("emit-runtime") {
        loader = loader.set_override("generation.emit_runtime", true)?;
    }
    if let Some(name) = input.file_name().and_then(|name| name.to_str()) {
        loader = loader.set_override("output.source_file", name)?;
    }
    Ok(loader.build()?)
}

/// Returns `Ok(false)` when compilation reported diagnostics
fn run(matches: &ArgMatches) -> Result<bool, CliError> {
    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_default();
    let source = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;

    let config = load_config(matches, &path)?;
    let compiler = Compiler::new(config);
    let output = compiler.compile(&source);
    report_diagnostics(&path, &output);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("auto");
    if format == "auto" {
        if output.source.is_some() {
            let out_dir = matches
                .get_one::<String>("out-dir")
                .map(PathBuf::from)
                .or_else(|| path.parent().map(Path::to_path_buf))
                .unwrap_or_default();
            write_artifacts(&compiler, &output, &out_dir)?;
            print!("{}", formats::serialize(&output, OutputFormat::Source)?);
        }
    } else {
        let format: OutputFormat = format.parse()?;
        match formats::serialize(&output, format) {
            Ok(text) => print!("{}", text),
            // The diagnostics already explain why the artifact is missing
            Err(FormatError::NotProduced(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(output.is_ok())
}

fn report_diagnostics(path: &Path, output: &CompileOutput) {
    for error in &output.errors {
        match error.position() {
            Some(position) => eprintln!(
                "{}:{}:{}: {}",
                path.display(),
                position.line + 1,
                position.column + 1,
                error
            ),
            None => eprintln!("{}: {}", path.display(), error),
        }
    }
}

fn write_artifacts(
    compiler: &Compiler,
    output: &CompileOutput,
    out_dir: &Path,
) -> Result<(), CliError> {
    let generated = out_dir.join(&compiler.config().output.generated_file);
    let map_path = out_dir.join(format!("{}.map", compiler.config().output.generated_file));

    let write = |target: &Path, contents: String| {
        fs::write(target, contents).map_err(|source| CliError::Write {
            path: target.to_path_buf(),
            source,
        })
    };

    write(&generated, formats::serialize(output, OutputFormat::Source)?)?;
    write(&map_path, formats::serialize(output, OutputFormat::Map)?)?;
    tracing::info!(program = %generated.display(), map = %map_path.display(), "wrote artifacts");
    Ok(())
}
