//! worldvault_init - One-time database initialization tool
//!
//! Creates a fresh grouping database with the default world group, and
//! optionally a starter settings file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// worldvault database initialization tool
#[derive(Parser, Debug)]
#[command(
    name = "worldvault_init",
    version,
    about = "Initialize a new worldvault database"
)]
struct Args {
    /// Path to SQLite database file to create (must not exist)
    #[arg(short, long)]
    database: PathBuf,

    /// Also write a starter settings file at this path (must not exist)
    #[arg(short, long)]
    settings: Option<PathBuf>,
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

    // Parse CLI arguments
    let args = Args::parse();

    worldvault::init::init_database(&args.database).await?;

    if let Some(settings) = &args.settings {
        worldvault::init::write_starter_settings(settings)?;
    }

    Ok(())
}
