mod logging;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mockify_core::{FieldDef, Value, random};
use mockify_factory::{BuildRequest, FactoryError, Manifest, ManifestError, Record};
use mockify_generate::{find_rule_for_field, infer_generator, registry};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum CliError {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("build error: {0}")]
    Factory(#[from] FactoryError),
    #[error("generation error: {0}")]
    Generation(#[from] mockify_core::GenerationError),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Parser, Debug)]
#[command(name = "mockify", version, about = "Mockify mock data CLI")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build records from a TOML or JSON manifest.
    Build(BuildArgs),
    /// Show which generator inference picks for field names.
    Infer(InferArgs),
    /// List registered generator ids.
    Generators(GeneratorsArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Path to a .toml or .json manifest.
    manifest: PathBuf,
    /// Number of records to build.
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,
    /// Trait to activate for every record.
    #[arg(long = "trait", value_name = "NAME")]
    trait_name: Option<String>,
    /// Seed the engine so the whole run is reproducible.
    #[arg(long)]
    seed: Option<u64>,
    /// Override a field; the value is parsed as JSON, falling back to a string.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,
    /// Print a single pretty JSON array instead of one record per line.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct InferArgs {
    /// Field names to look up.
    #[arg(required = true)]
    names: Vec<String>,
    /// Seed for the sample values.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct GeneratorsArgs {
    /// Print a sample value next to each id.
    #[arg(long, default_value_t = false)]
    sample: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json)?;

    match cli.command {
        Command::Build(args) => run_build(args),
        Command::Infer(args) => run_infer(args),
        Command::Generators(args) => run_generators(args),
    }
}

fn run_build(args: BuildArgs) -> Result<(), CliError> {
    let BuildArgs {
        manifest,
        count,
        trait_name,
        seed,
        overrides,
        pretty,
    } = args;

    let factory = Manifest::from_path(&manifest)?.to_factory()?;
    if let Some(seed) = seed {
        random::set_seed(seed);
    }

    let mut request = match trait_name {
        Some(name) => BuildRequest::for_trait(name),
        None => BuildRequest::new(),
    };
    for raw in &overrides {
        let (field, value) = parse_override(raw)?;
        request = request.set(field, value);
    }

    let records = factory.build_many(count, request)?;
    info!(
        manifest = %manifest.display(),
        count = records.len(),
        "records built"
    );
    write_records(&records, pretty)
}

fn write_records(records: &[Record], pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, records)?;
        writeln!(out)?;
    } else {
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_infer(args: InferArgs) -> Result<(), CliError> {
    let mut rng = random::global();
    if let Some(seed) = args.seed {
        rng.set_seed(seed);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in &args.names {
        let sample = infer_generator(name).value(&mut rng)?;
        let (label, priority) = match find_rule_for_field(name) {
            Some(rule) => (rule.label(), rule.priority().to_string()),
            None => ("string.word", "fallback".to_string()),
        };
        writeln!(
            out,
            "{name}\t{label}\t{priority}\t{}",
            serde_json::to_string(&sample)?
        )?;
    }
    Ok(())
}

fn run_generators(args: GeneratorsArgs) -> Result<(), CliError> {
    let registry = registry();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.sample {
        for id in registry.ids() {
            writeln!(out, "{id}")?;
        }
        return Ok(());
    }

    let mut rng = random::global();
    for id in registry.ids() {
        let Some(generator) = registry.generator(id) else {
            continue;
        };
        let sample = generator.value(&mut rng)?;
        writeln!(out, "{id}\t{}", serde_json::to_string(&sample)?)?;
    }
    Ok(())
}

fn parse_override(raw: &str) -> Result<(String, FieldDef), CliError> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidArgument(format!(
            "expected FIELD=VALUE, got '{raw}'"
        )));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "missing field name in '{raw}'"
        )));
    }
    let value = serde_json::from_str::<serde_json::Value>(value)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(value));
    Ok((field.to_string(), FieldDef::from(value)))
}
