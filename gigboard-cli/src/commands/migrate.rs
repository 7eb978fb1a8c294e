//! Migration command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gigboard_server::config::GigboardConfig;
use gigboard_server::db::{create_pool_with_options, migrate};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Config file (default: ~/.gigboard/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Apply pending migrations and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let mut config =
        GigboardConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let (database_url, max_connections) = pool_settings(&config)?;

    let pool = create_pool_with_options(database_url, max_connections)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await.context("Failed to run migrations")?;
    println!("Migrations applied");

    Ok(())
}

/// Database URL and pool size from the resolved config
fn pool_settings(config: &GigboardConfig) -> Result<(&str, u32)> {
    let database_url = config
        .database_url()
        .context("Set --database-url, DATABASE_URL, or [database] url in the config file")?;
    Ok((database_url, config.database.max_connections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_uses_configured_size() {
        let mut config = GigboardConfig::default();
        config.database.url = Some("postgres://localhost/gigboard".into());
        config.database.max_connections = 2;

        let (url, max) = pool_settings(&config).unwrap();
        assert_eq!(url, "postgres://localhost/gigboard");
        assert_eq!(max, 2);
    }

    #[test]
    fn missing_url_names_every_source() {
        let err = pool_settings(&GigboardConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("DATABASE_URL"));
    }
}
