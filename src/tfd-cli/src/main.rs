mod cli;
mod client;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        None => commands::export::handle(&config_path, &cli.export)?,

        Some(Commands::Export(args)) => commands::export::handle(&config_path, &args)?,

        Some(Commands::Configure(args)) => commands::configure::handle(&config_path, args)?,

        Some(Commands::Postprocess { input }) => commands::postprocess::handle(&input)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "tfd=debug,tfd_meta=debug"
    } else {
        "tfd=info,tfd_meta=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
