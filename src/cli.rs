use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "transfer", version)]
#[command(about = "Status and control CLI for transfer-to-vault pipelines", long_about = None)]
pub struct Cli {
    /// Configuration file (YAML, or JSON when the name ends in .json)
    #[arg(
        short,
        long,
        global = true,
        env = "TRANSFER_CLI_CONFIG",
        default_value = "config.yml"
    )]
    pub config: PathBuf,

    /// The pipeline instance to execute the command on
    #[arg(short, long, global = true)]
    pub pipeline: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flush the staged batch to the data vault
    FlushWorkToVault,
    /// Print a status report for a transfer pipeline
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show all batches, including completed ones
    #[arg(short, long, default_value_t = false)]
    pub all_batches: bool,
}
