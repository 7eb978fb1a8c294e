//! HTTP error types with IntoResponse
//!
//! Errors render as static HTML error pages. Details of database and
//! template failures are logged, never shown.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::pages::{BadRequestPage, NotFoundPage, ServerErrorPage, UnavailablePage};
use crate::db::repos::DbError;
use askama::Template;

/// HTTP error type with automatic status mapping
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Malformed request (400)
    #[error("bad request: {0}")]
    Validation(String),

    /// Unknown route or row (404)
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Pool or connection failure (503)
    #[error("database unavailable: {0}")]
    Unavailable(#[source] DbError),

    /// Any other database failure (500, logged)
    #[error("database error: {0}")]
    Database(#[source] DbError),

    /// Template rendering failure (500, logged)
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let page = match &self {
            Self::Validation(message) => {
                tracing::warn!(%message, "rejected request");
                BadRequestPage {
                    message: message.clone(),
                }
                .render()
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(resource = *resource, id = %id, "not found");
                NotFoundPage.render()
            }
            Self::Unavailable(e) => {
                tracing::error!("Database unavailable: {}", e);
                UnavailablePage.render()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                ServerErrorPage.render()
            }
            Self::Template(e) => {
                tracing::error!("Template error: {}", e);
                ServerErrorPage.render()
            }
        };

        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Error page failed to render: {}", e);
                (status, status.canonical_reason().unwrap_or("error")).into_response()
            }
        }
    }
}

impl From<DbError> for HttpError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Unavailable(_) => Self::Unavailable(e),
            _ => Self::Database(e),
        }
    }
}

/// Status for a form re-rendered after its write failed.
pub fn mutation_status(e: &DbError) -> StatusCode {
    match e {
        DbError::Constraint { .. } => StatusCode::CONFLICT,
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed write at a level matching its cause.
pub fn log_mutation_failure(action: &'static str, e: &DbError) {
    match e {
        DbError::Constraint { .. } | DbError::NotFound { .. } => {
            tracing::warn!(action, error = %e, "mutation rejected");
        }
        DbError::Unavailable(_) | DbError::Sqlx(_) => {
            tracing::error!(action, error = %e, "mutation failed");
        }
    }
}
