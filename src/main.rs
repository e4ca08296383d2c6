mod config;
mod engine;
mod model;
mod render;
mod stats;

use crate::config::Config;
use crate::engine::Engine;
use crate::render::LogRenderer;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file (defaults are used if absent).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the random number generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps to simulate.
    #[arg(long)]
    steps: Option<usize>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mut cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        cfg.init.seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        cfg.output.n_steps = steps;
    }
    cfg.validate().context("failed to validate cfg")?;
    log::info!("{cfg:#?}");

    let mut engine = Engine::from_seed(cfg.model.clone(), cfg.init.seed)
        .context("failed to construct engine")?;
    log::info!("start position: {:?}", engine.position());

    let mut renderer = LogRenderer::new(cfg.output.n_steps, cfg.output.report_interval);
    engine
        .run(cfg.output.n_steps, &mut renderer)
        .context("failed to run simulation")?;

    let arena_size = engine.cfg().arena_size;
    log::info!("final position: {:?} (arena size {arena_size})", engine.position());
    log::info!("final heading: {:.4}", engine.heading());
    log::info!("total positions: {}", engine.trajectory().len());
    log::info!("final {:#?}", engine.stats());

    Ok(())
}
