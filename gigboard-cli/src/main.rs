//! gigboard CLI - venue and artist directory server
//!
//! - `serve`: run migrations, then the HTTP server
//! - `migrate`: apply pending migrations and exit
//! - `config`: print the effective configuration as TOML

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gigboard",
    author,
    version,
    about = "Venue and artist directory with show booking",
    long_about = "Server-rendered directory of music venues and artists. Lists and searches \
                  both, books shows, and splits them into past and upcoming."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (applies pending migrations first)
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Print the effective configuration as TOML
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Config(args) => commands::run_config(args)?,
    }
    Ok(())
}
