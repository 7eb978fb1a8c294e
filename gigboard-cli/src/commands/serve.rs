//! HTTP server command
//!
//! Resolves configuration (file, environment, flags), applies pending
//! migrations and serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gigboard_server::config::{parse_timezone, GigboardConfig};
use gigboard_server::db::{create_pool_with_options, migrate};
use gigboard_server::http::run_server;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// IANA timezone for displaying and reading show times (e.g. America/Chicago)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Config file (default: ~/.gigboard/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(&self, config: &mut GigboardConfig) -> Result<()> {
        if let Some(bind) = self.bind {
            config.server.bind_addr = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(tz) = &self.timezone {
            parse_timezone(tz)?;
            config.display.timezone = tz.clone();
        }
        Ok(())
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config =
        GigboardConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config)?;

    let server_config = config.server_config()?;
    let database_url = config
        .database_url()
        .context("Set --database-url, DATABASE_URL, or [database] url in the config file")?;

    tracing::info!(
        bind = %server_config.bind_addr,
        max_connections = config.database.max_connections,
        "Starting gigboard server"
    );

    let pool = create_pool_with_options(database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrate(&pool).await.context("Failed to run migrations")?;

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
