//! Main entry point for the TransLingua CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod engine;
mod server;
mod session;

use cli::commands::Commands;

/// TransLingua - multi-language translation service backed by MarianMT models
#[derive(Parser, Debug)]
#[command(name = "translingua", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Execute command
    match args.command {
        Some(Commands::Serve { host, port }) => {
            cli::commands::handle_serve(host, port).await?;
        }
        Some(Commands::Translate {
            text,
            pair,
            from,
            to,
        }) => {
            cli::commands::handle_translate(text, pair, from, to).await?;
        }
        Some(Commands::Pairs) => {
            cli::commands::handle_pairs().await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
