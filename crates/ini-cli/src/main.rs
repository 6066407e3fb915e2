use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ini-cli",
    about = "Decode an INI file against a JSON schema description and print it as JSON",
    version
)]
struct Args {
    /// JSON schema description ({"fields": [...]})
    #[arg(short, long)]
    schema: PathBuf,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Fail when any line matches no field
    #[arg(long, default_value_t = false)]
    deny_unmatched: bool,

    /// Do not report unknown [section] headers
    #[arg(long, default_value_t = false)]
    ignore_unknown_sections: bool,

    /// Accept section names without brackets as headers
    #[arg(long, default_value_t = false)]
    bare_sections: bool,

    /// Stop at the first invalid value
    #[arg(long, default_value_t = false)]
    stop_on_error: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let schema_text = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("reading schema {}", args.schema.display()))?;
    let desc = ini::SchemaDesc::from_json(&schema_text).context("parsing schema")?;
    debug!(fields = desc.fields.len(), "schema loaded");

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(stdin()),
    };

    let options = ini::Options {
        unknown_sections: if args.ignore_unknown_sections {
            ini::UnknownSection::Ignore
        } else {
            ini::UnknownSection::Record
        },
        bare_section_headers: args.bare_sections,
        stop_on_error: args.stop_on_error,
    };

    let mut record = ini::DynamicRecord::new(&desc);
    let mut decoder = ini::Decoder::with_options(reader, options);
    let result = decoder.decode(&mut record);

    for u in decoder.unmatched_lines() {
        eprintln!("unmatched line {}: {}", u.line, u.text);
    }
    if let Err(e) = result {
        return Err(e).context("decode failed");
    }

    let value = record.to_json();
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", serde_json::to_string(&value)?);
    }

    if args.deny_unmatched && !decoder.unmatched_lines().is_empty() {
        warn!(count = decoder.unmatched_lines().len(), "unmatched lines present");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
