// Main entry point for testreport

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use testreport::cli::{Cli, Commands};
use testreport::commands;
use testreport::config::Config;
use testreport::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting testreport v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(ref path) = cli.init_config {
        return commands::handle_init_config(path);
    }

    // Command-line arguments override the config file, which overrides defaults
    let config = Config::load().unwrap_or_default();

    match &cli.command {
        Some(Commands::Report(args)) => match commands::handle_report(&cli, args, &config).await {
            Ok(true) => std::process::exit(1),
            Ok(false) => Ok(()),
            Err(e) => {
                error!("{:#}", e);
                Err(e)
            }
        },
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
