//! Route handlers organized by resource

pub mod artists;
pub mod assets;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::Uri;

use super::error::HttpError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> HttpError {
    HttpError::NotFound {
        resource: "route",
        id: uri.path().to_string(),
    }
}
