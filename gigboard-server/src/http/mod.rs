//! HTTP server layer
//!
//! Axum server with:
//! - Server-rendered askama pages
//! - Flash notices in a one-shot cookie
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - Static HTML error pages

pub mod error;
pub mod extractors;
pub mod flash;
pub mod pages;
pub mod routes;
pub mod server;
pub mod views;

pub use error::HttpError;
pub use server::{build_router, run_server, AppState, ServeError, ServerConfig};
