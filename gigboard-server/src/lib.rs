//! gigboard-server: venue and artist directory with show booking
//!
//! Server-rendered HTML over Postgres. Venues and artists are listed,
//! searched and edited through forms; shows book one artist into one
//! venue and are split into past and upcoming at query time.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, GigboardConfig};
pub use db::{create_pool, create_pool_with_options, migrate, DbError, MIGRATOR};
pub use http::{build_router, run_server, AppState, HttpError, ServeError, ServerConfig};
