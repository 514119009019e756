mod serve_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tubewire")]
#[command(about = "tubewire: WhatsApp bot that relays YouTube videos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server and the WhatsApp bot
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// YAML config file (defaults to ~/.tubewire/config.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the pairing status of a running instance
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { port: None, config: None }) {
        Commands::Serve { port, config } => serve_cmd::run(port, config).await,
        Commands::Status { port } => status_cmd::run(port).await,
    }
}
