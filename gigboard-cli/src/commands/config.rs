//! Config command - print the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gigboard_server::config::GigboardConfig;

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config file (default: ~/.gigboard/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let config =
        GigboardConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Surfaces a bad timezone before anyone runs `serve`
    config.timezone()?;

    let toml_str = config
        .redacted()
        .to_toml_string()
        .context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);

    Ok(())
}
