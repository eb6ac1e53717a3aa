//! UDS Template Renderer CLI
//!
//! Renders one template against the definition model. The output file is
//! named after the template with its suffix removed:
//!
//! ```text
//! uds-def-render -t templates/cpp/uds_def.h.template -o out/
//! # writes out/uds_def.h
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uds_def_gen::{generate_from_template, GenConfig, UdsModel};

#[derive(Parser)]
#[command(name = "uds-def-render")]
#[command(about = "Render a single template against the UDS definition model")]
struct Cli {
    /// Template file, e.g. uds_def.h.template
    #[arg(short, long)]
    template: PathBuf,

    /// Existing output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Config file (in addition to udsgen.toml and UDSGEN__* variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding serv.json, serv_sub.json and req_resp.json
    #[arg(long)]
    definitions: Option<PathBuf>,
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

    let model = UdsModel::load(&config.definition_paths())?;
    let written = generate_from_template(&model, &cli.template, &cli.output, &config.output.template_suffix)?;

    println!("✅ {}", written.display());
    Ok(())
}
