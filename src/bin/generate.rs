//! UDS Definition Generator CLI
//!
//! Builds the model from the configured definition documents and writes the
//! fixed `uds_def.h` / `uds_def.cpp` pair.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uds_def_gen::{generate_fixed, GenConfig, UdsModel};

#[derive(Parser)]
#[command(name = "uds-def-gen")]
#[command(about = "Generate the C++ UDS definition header and implementation")]
struct Cli {
    /// Config file (in addition to udsgen.toml and UDSGEN__* variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding serv.json, serv_sub.json and req_resp.json
    #[arg(long)]
    definitions: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GenConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.definitions {
        config.definitions.dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output.dir = dir;
    }

    let model = UdsModel::load(&config.definition_paths())?;
    let written = generate_fixed(&model, &config.template_source(), &config.output.dir)?;

    for path in &written {
        println!("✅ {}", path.display());
    }
    println!("UDS definitions generated successfully.");
    Ok(())
}
