//! Purpose: `jsonvariant` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, writes results on stdout.
//! Invariants: `insert` writes spliced bytes verbatim; `locate` emits one JSON line.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use jsonvariant::api::{Error, ErrorKind, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print()
                    .map_err(|io_err| io_error(io_err, "failed to write help"))?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `jsonvariant --help`."));
            }
        },
    };

    command_dispatch::dispatch_command(cli.command)
}

#[derive(Parser)]
#[command(
    name = "jsonvariant",
    version,
    about = "Find and insert discriminator tags in JSON objects",
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo '{"n": 1, "type": "hello"}' | jsonvariant locate --tag hello --tag goodbye
  {"tag":"hello","type":"hello"}
  $ echo '{"target":"world"}' | jsonvariant insert --value hello
  {"type": "hello","target":"world"}
  $ jsonvariant locate --schema schema.json message.json"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the tag property of a JSON object against a schema.
    Locate(LocateArgs),
    /// Insert a tag property as the first member of a JSON object.
    Insert(InsertArgs),
    /// Print shell completions.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct LocateArgs {
    #[arg(
        long,
        help = "JSON schema config: {\"tag_key\", \"tags\", \"types\", \"require_tag_first\"}",
        value_hint = ValueHint::FilePath,
        conflicts_with_all = ["key", "tags"]
    )]
    schema: Option<PathBuf>,
    #[arg(long, default_value = "type", help = "Tag property name")]
    key: String,
    #[arg(
        long = "tag",
        value_name = "TAG",
        help = "Accepted tag value (repeatable); each tag is its own type name"
    )]
    tags: Vec<String>,
    #[arg(long, help = "Require the tag to be the first property")]
    first: bool,
    #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct InsertArgs {
    #[arg(long, default_value = "type", help = "Tag property name")]
    key: String,
    #[arg(long, help = "Tag value to insert")]
    value: String,
    #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn io_error(err: io::Error, message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Io)
        .with_message(message)
        .with_source(err)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(path) => std::fs::read(path)
            .map_err(|err| io_error(err, format!("failed to read {}", path.display()))),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|err| io_error(err, "failed to read stdin"))?;
            Ok(buf)
        }
    }
}

fn emit_json(value: Value) -> Result<(), Error> {
    let json = serde_json::to_string(&value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").map_err(|err| io_error(err, "failed to write stdout"))
}

fn emit_bytes(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|err| io_error(err, "failed to write stdout"))
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Json\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_causes(err: &Error) -> Vec<String> {
    let message = err.to_string();
    let mut causes = Vec::new();
    let mut cur = std::error::Error::source(err);
    while let Some(source) = cur {
        let text = source.to_string();
        if text != message {
            causes.push(text);
        }
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(err.to_string()));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {err}")];
    if let Some(offset) = err.offset() {
        lines.push(format!("offset: {offset}"));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
