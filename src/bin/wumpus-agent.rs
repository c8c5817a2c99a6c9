//! Wumpus agent CLI - inspect trained models and agent configuration

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wumpus-agent")]
#[command(version, about = "Q-learning agent for the Wumpus World", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the greedy policy stored in a model file
    Inspect(wumpus_agent::cli::commands::inspect::InspectArgs),

    /// Print the resolved agent configuration
    Config(wumpus_agent::cli::commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wumpus_agent::cli::setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Inspect(args) => wumpus_agent::cli::commands::inspect::execute(args),
        Commands::Config(args) => wumpus_agent::cli::commands::config::execute(args),
    }
}
