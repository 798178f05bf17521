use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use frost_merge::{values, MergeConfig, Merger};
use frost_types::{Node, Record};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "merge configuration");
    let merger = Merger::new(config);
    let format = cli.format;
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Merge(args) => cmd_merge(&merger, args, &format, &mut out),
        Command::Set(args) => cmd_set(&merger, args, &format, &mut out),
        Command::Delete(args) => cmd_delete(&merger, args, &format, &mut out),
        Command::Values(args) => cmd_values(args, &format, &mut out),
        Command::Construct(args) => cmd_construct(&merger, args, &format, &mut out),
    }
}

fn cmd_merge(
    merger: &Merger,
    args: MergeArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let base = load_record(&args.base, args.seal_nested)?;
    let patch = load_node(&args.patch)?;
    let (result, mode) = if args.deep {
        (merger.set_deep(&base, &patch), "deep")
    } else {
        (merger.set(&base, &patch), "shallow")
    };
    let result = result.with_context(|| {
        format!(
            "{mode} merge of {} into {} failed",
            args.patch.display(),
            args.base.display()
        )
    })?;
    emit(&result, format, &format!("{mode} merge: {} keys", result.len()), out)
}

fn cmd_set(
    merger: &Merger,
    args: SetArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let base = load_record(&args.base, false)?;
    let result = merger.set_property(&base, args.key.as_str(), parse_value(&args.value))?;
    emit(&result, format, &format!("set {}", args.key.yellow()), out)
}

fn cmd_delete(
    merger: &Merger,
    args: DeleteArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let base = load_record(&args.base, false)?;
    let result = merger.delete_property(&base, &args.key)?;
    let summary = if result.len() < base.entries().map_or(0, |e| e.len()) {
        format!("deleted {}", args.key.yellow())
    } else {
        format!("{} not present; nothing deleted", args.key.yellow())
    };
    emit(&result, format, &summary, out)
}

fn cmd_values(
    args: ValuesArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let record = load_record(&args.file, false)?;
    let values = values(&record)?;
    match format {
        OutputFormat::Json => {
            let array = Value::Array(values.iter().map(Node::to_json).collect());
            writeln!(out, "{}", serde_json::to_string(&array)?)?;
        }
        OutputFormat::Text => {
            for value in &values {
                writeln!(out, "{}", serde_json::to_string(value)?)?;
            }
        }
    }
    Ok(())
}

fn cmd_construct(
    merger: &Merger,
    args: ConstructArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let sources = args
        .sources
        .iter()
        .map(|path| load_node(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let result = merger.construct(&sources)?;
    emit(
        &result,
        format,
        &format!("constructed from {} sources", sources.len()),
        out,
    )
}

/// Write the record to `out`; in text mode the summary line goes to stderr.
fn emit(
    record: &Record,
    format: &OutputFormat,
    summary: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(record)?)?,
        OutputFormat::Text => {
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
            eprintln!("{} {}", "✓".green().bold(), summary);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MergeConfig> {
    let Some(path) = path else {
        return Ok(MergeConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn load_node(path: &Path) -> anyhow::Result<Node> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Load a JSON object and seal it, either one level or all the way down.
fn load_record(path: &Path, seal_nested: bool) -> anyhow::Result<Node> {
    let node = load_node(path)?;
    if !node.is_mapping() {
        bail!(
            "{} must contain a JSON object, found {}",
            path.display(),
            node.kind_name()
        );
    }
    Ok(if seal_nested {
        node.sealed_deep()
    } else {
        node.into_sealed()
    })
}

/// JSON if it parses, otherwise the raw text as a string.
fn parse_value(raw: &str) -> Node {
    serde_json::from_str::<Value>(raw)
        .map(Node::from)
        .unwrap_or_else(|_| Node::from(raw))
}
