//! Purpose: Hold top-level CLI command dispatch for `jsonvariant`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command output formats and exit code semantics stay stable.
//! Invariants: Schema loading errors are usage errors; input errors keep their kind.

use super::*;

use jsonvariant::api::{Located, Schema, SchemaConfig, insert_tag, locate};
use tracing::debug;

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "jsonvariant", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Locate(args) => {
            let schema = load_schema(&args)?;
            let input = read_input(args.input.as_deref())?;
            debug!(
                bytes = input.len(),
                entries = schema.entries().len(),
                "locating tag"
            );
            let value = match locate(&schema, &input)? {
                Located::Null => json!({ "tag": null, "type": null }),
                Located::Variant { tag, ty } => json!({ "tag": tag, "type": ty }),
            };
            emit_json(value)?;
            Ok(RunOutcome::ok())
        }
        Command::Insert(args) => {
            let input = read_input(args.input.as_deref())?;
            let output = insert_tag(&input, &args.key, &args.value)?;
            emit_bytes(&output)?;
            Ok(RunOutcome::ok())
        }
    }
}

fn load_schema(args: &LocateArgs) -> Result<Schema<String>, Error> {
    let Some(path) = &args.schema else {
        let schema = Schema::from_parts(&args.key, args.tags.clone(), args.tags.clone())?;
        return Ok(schema.with_require_tag_first(args.first));
    };
    let raw = std::fs::read(path)
        .map_err(|err| io_error(err, format!("failed to read {}", path.display())))?;
    let config: SchemaConfig<String> = serde_json::from_slice(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid schema file {}", path.display()))
            .with_hint("Expected {\"tag_key\": ..., \"tags\": [...], \"types\": [...]}.")
            .with_source(err)
    })?;
    let require_tag_first = config.require_tag_first || args.first;
    Ok(config.into_schema()?.with_require_tag_first(require_tag_first))
}
