//! spanql CLI - run a filter query over spansets stored as JSON

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use spanql::query;
use spanql::span::Spanset;
use std::path::PathBuf;

/// Filter JSON spansets with a span filter query
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query text, e.g. '{ .name = "GET /api" }'
    query: String,

    /// Read spansets from this JSON file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    let spansets: Vec<Spanset> =
        serde_json::from_str(&input).context("Failed to parse input spansets")?;

    let query = query::parse(&args.query)
        .with_context(|| format!("Failed to parse query '{}'", args.query))?;

    let output = query.pipeline.evaluate(spansets)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
