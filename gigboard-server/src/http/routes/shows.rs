//! Show pages: listing and booking form

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;

use crate::db::repos::{ArtistRepo, DbError, EntityOption, ShowRepo, VenueRepo};
use crate::http::error::{log_mutation_failure, mutation_status, HttpError};
use crate::http::extractors::FormBody;
use crate::http::flash::{Flash, IncomingFlash};
use crate::http::pages::{render, ShowFormPage, ShowsPage};
use crate::http::server::AppState;
use crate::http::views::{entity_options, Notice, ShowRow};
use crate::models::ShowForm;

/// Artist and venue choices for the booking form
async fn load_choices(state: &AppState) -> Result<(Vec<EntityOption>, Vec<EntityOption>), DbError> {
    let artists = ArtistRepo::new(&state.pool).options().await?;
    let venues = VenueRepo::new(&state.pool).options().await?;
    Ok((artists, venues))
}

/// Re-render the booking form. Choices are best effort so a rejected
/// form still answers when the database is down.
async fn rerender(
    state: &AppState,
    status: StatusCode,
    form: &ShowForm,
    errors: Vec<String>,
    notices: Vec<Notice>,
) -> Result<Response, HttpError> {
    let (artists, venues) = match load_choices(state).await {
        Ok(choices) => choices,
        Err(e) => {
            tracing::warn!(error = %e, "show form rendered without choices");
            (Vec::new(), Vec::new())
        }
    };

    let page = ShowFormPage {
        notices,
        artists: entity_options(artists, &form.artist_id),
        venues: entity_options(venues, &form.venue_id),
        start_time: form.start_time.clone(),
        errors,
    };
    Ok((status, render(&page)?).into_response())
}

/// GET /shows - every show by start time
async fn list_shows(
    State(state): State<Arc<AppState>>,
    flash: IncomingFlash,
) -> Result<impl IntoResponse, HttpError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    let tz = state.timezone;

    let page = ShowsPage {
        notices: flash.notices(),
        shows: shows.into_iter().map(|s| ShowRow::new(s, tz)).collect(),
    };
    Ok((flash.consume(), render(&page)?))
}

/// GET /shows/create - booking form
async fn create_show_form(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpError> {
    let (artists, venues) = load_choices(&state).await?;

    let page = ShowFormPage {
        notices: Vec::new(),
        artists: entity_options(artists, ""),
        venues: entity_options(venues, ""),
        start_time: String::new(),
        errors: Vec::new(),
    };
    render(&page)
}

/// POST /shows/create - validate, book, redirect home
async fn create_show(
    State(state): State<Arc<AppState>>,
    FormBody(fields): FormBody,
) -> Result<Response, HttpError> {
    let form = ShowForm::from_fields(&fields);
    let new = match form.validate(state.timezone) {
        Ok(new) => new,
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "show form rejected");
            return rerender(&state, StatusCode::BAD_REQUEST, &form, errors.messages(), Vec::new())
                .await;
        }
    };

    match ShowRepo::new(&state.pool).create(&new).await {
        Ok(show) => {
            tracing::info!(
                show_id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                start_time = %show.start_time,
                "show listed"
            );
            Ok((Flash::new("Show was successfully listed!"), Redirect::to("/")).into_response())
        }
        Err(e) => {
            log_mutation_failure("create show", &e);
            let (status, errors) = match &e {
                DbError::NotFound { .. } => (StatusCode::UNPROCESSABLE_ENTITY, vec![e.to_string()]),
                _ => (mutation_status(&e), Vec::new()),
            };
            let notice = Notice::error("An error occurred. Show could not be listed.");
            rerender(&state, status, &form, errors, vec![notice]).await
        }
    }
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
