//! Home page

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::{routing::get, Router};

use crate::http::error::HttpError;
use crate::http::flash::IncomingFlash;
use crate::http::pages::{render, HomePage};
use crate::http::server::AppState;

/// GET / - search forms and pending notices
async fn index(flash: IncomingFlash) -> Result<impl IntoResponse, HttpError> {
    let page = HomePage {
        notices: flash.notices(),
    };
    Ok((flash.consume(), render(&page)?))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
