use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "earthwalker")]
#[command(about = "Earthwalker - street-level geography guessing game server")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ./earthwalker.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game server and provider proxy
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the provider viewer URL for a location
    Url {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Provider panorama ID
        pano: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = earthwalker::config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { port }) => cli::serve::serve_command(config, port)?,
        Some(Commands::Url { lat, lng, pano }) => cli::url::url_command(&config, lat, lng, pano),
        None => cli::serve::serve_command(config, None)?,
    }

    Ok(())
}
