//! Configuration - `~/.gigboard/config.toml` plus environment overrides
//!
//! Resolution order, lowest to highest:
//! 1. Built-in defaults
//! 2. The TOML file (`--config` path or `~/.gigboard/config.toml`)
//! 3. `GIGBOARD_BIND`, `DATABASE_URL`, `GIGBOARD_TIMEZONE`, `GIGBOARD_MAX_CONNECTIONS`
//! 4. CLI flags (applied by the binary)

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;

/// Stand-in for credentials in printed configuration
const REDACTED: &str = "****";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown timezone {0:?} (expected an IANA name such as America/New_York)")]
    InvalidTimezone(String),

    #[error("no database URL configured (set DATABASE_URL or [database] url)")]
    MissingDatabaseUrl,

    #[error("failed to serialize config to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Full gigboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GigboardConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub display: DisplaySection,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_addr: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

/// `[database]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// `[display]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA timezone used to render and read show start times
    pub timezone: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl GigboardConfig {
    /// Default config file path: ~/.gigboard/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gigboard/config.toml")
    }

    /// Load the file layer, then apply process environment overrides.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = ?default_path, "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("GIGBOARD_BIND") {
            self.server.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnv {
                    var: "GIGBOARD_BIND",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup("DATABASE_URL") {
            if !value.trim().is_empty() {
                self.database.url = Some(value);
            }
        }

        if let Some(value) = lookup("GIGBOARD_MAX_CONNECTIONS") {
            self.database.max_connections =
                value.parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidEnv {
                        var: "GIGBOARD_MAX_CONNECTIONS",
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })?;
        }

        if let Some(value) = lookup("GIGBOARD_TIMEZONE") {
            parse_timezone(&value)?;
            self.display.timezone = value;
        }

        Ok(())
    }

    /// Configured display timezone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        parse_timezone(&self.display.timezone)
    }

    /// Configured database URL, required by `serve` and `migrate`.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// HTTP server settings derived from this config.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        Ok(ServerConfig {
            bind_addr: self.server.bind_addr,
            cors_permissive: self.server.cors_permissive,
            timezone: self.timezone()?,
        })
    }

    /// Render as pretty TOML (the `gigboard config` output).
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Copy safe to print: the database password is masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.database.url = config.database.url.as_deref().map(redact_database_url);
        config
    }
}

/// Mask the password of a database URL, both the userinfo part and a
/// `password` query parameter. Unparseable input is masked entirely.
pub fn redact_database_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return REDACTED.to_string();
    };

    if url.password().is_some() {
        // Only cannot-be-a-base URLs refuse a password, and those never carry one
        let _ = url.set_password(Some(REDACTED));
    }

    if url.query_pairs().any(|(key, _)| key == "password") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "password" {
                    REDACTED.to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(name.to_string()))
}
