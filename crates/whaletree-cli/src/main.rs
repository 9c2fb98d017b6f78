use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use whaletree_cli::{RenderArgs, WhaletreeConfig, WhaletreeOptions, run_main, write_output};

#[derive(Parser, Debug)]
#[command(
    name = "whaletree",
    about = "whaletree: flatten the whale taxonomy into a chart, or render it as a tree view",
    version
)]
pub struct Cli {
    /// Taxonomy dataset (JSON)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        default_value = "data/whales.json"
    )]
    input: PathBuf,

    #[command(flatten)]
    render: RenderArgs,

    /// TOML config with [chart] and [tree_view] defaults
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &args.config {
        Some(path) => WhaletreeConfig::from_path(path)?,
        None => WhaletreeConfig::default(),
    };
    let opts = WhaletreeOptions::resolve(args.input, &args.render, &config);

    let output = run_main(&opts).inspect_err(|e| {
        tracing::error!(error = %e, "execution failed");
    })?;
    write_output(args.output.as_deref(), &output)?;

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
