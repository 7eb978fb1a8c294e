//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool shared by every handler - no Arc<Mutex<Connection>>
//! - List operations use JOINs - no N+1 queries
//! - Every mutation runs in exactly one transaction

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, migrate, MIGRATOR};
pub use repos::*;
