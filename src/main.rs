mod cli;
mod client;
mod config;
mod error;
mod flush;
mod logging;
mod size;
mod status;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use client::PipelineRegistry;
use config::CliConfig;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    debug!(config=?cli.config, pipeline=?cli.pipeline, "loading configuration");
    let config = CliConfig::load(&cli.config)?;
    let selector = cli.pipeline.as_deref();

    match cli.command {
        Commands::FlushWorkToVault => {
            let registry = PipelineRegistry::from_config(&config)?;
            flush::run_flush(registry.api(selector)?)?;
        }
        Commands::Status(args) => {
            status::run_status(&config, selector, args)?;
        }
    }

    Ok(())
}
