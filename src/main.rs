//! worldvault - console host
//!
//! Drives the engine through an in-memory player roster, reading command
//! lines from stdin. Useful for poking at a grouping database without a
//! game server attached.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worldvault::commands::ROOT_COMMAND;
use worldvault::host::{ConsoleSender, MemoryHost};
use worldvault::{Config, Engine};

/// Console host for the worldvault engine
#[derive(Parser, Debug)]
#[command(name = "worldvault", version, about = "worldvault console host")]
struct Args {
    /// SQLite database file (in-memory when omitted)
    #[arg(short, long)]
    database: Option<String>,

    /// Settings TOML file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Player names to preload into the roster (repeatable)
    #[arg(long = "player")]
    players: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldvault=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let host = Arc::new(MemoryHost::new());
    for name in &args.players {
        host.add_player(name);
    }

    let config = Config {
        db_path: args.database,
        settings_path: args.settings,
    };
    let engine = Engine::new(config, host.clone()).await?;
    let sender = ConsoleSender;

    println!(
        "worldvault console. Enter '{} <subcommand> ...', or 'quit' to exit.",
        ROOT_COMMAND
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            [root, rest @ ..] => {
                if !engine.on_command(&sender, root, root, rest).await {
                    println!("Unknown command '{}'; try '{}'", root, ROOT_COMMAND);
                }
            }
        }
    }

    Ok(())
}
