// src/tools/bsplit.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bsplit_rs::{SplitEngine, SplitPlan, DEFAULT_NAME_TEMPLATE};

/// Split a binary file into sequential segments at absolute byte offsets
#[derive(Clone, Debug, Parser)]
#[command(name = "bsplit", version)]
struct Args {
    /// output filename template with one integer placeholder, e.g. part-%03d.bin
    #[arg(short, long, default_value = DEFAULT_NAME_TEMPLATE)]
    name: String,
    /// source file to split
    file: PathBuf,
    /// colon-separated absolute byte offsets, e.g. 1000000:2000000:5000000
    split_spec: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let size = std::fs::metadata(&args.file)
        .with_context(|| format!("failed to stat {}", args.file.display()))?
        .len();
    let plan = SplitPlan::from_spec(&args.split_spec, size);

    let summary = SplitEngine::new()
        .with_name_template(&args.name)
        .run(&args.file, &plan)?;

    println!("{:x} {:x}", summary.bytes_copied, summary.source_size);
    Ok(())
}
