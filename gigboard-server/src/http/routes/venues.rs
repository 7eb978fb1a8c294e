//! Venue pages: listing, search, profile, create, edit and delete

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::db::repos::{DbError, VenueRepo};
use crate::http::error::{log_mutation_failure, mutation_status, HttpError};
use crate::http::extractors::{EntityId, FormBody};
use crate::http::flash::{Flash, IncomingFlash};
use crate::http::pages::{render, ProfilePage, SearchPage, VenueFormPage, VenuesPage};
use crate::http::server::AppState;
use crate::http::views::{
    genre_options, seeking_options, state_options, venue_form, AreaView, LinkedShow, ListedEntity,
    Notice, ProfileView,
};
use crate::models::VenueForm;

fn form_page(
    title: &str,
    action: String,
    form: VenueForm,
    errors: Vec<String>,
    notices: Vec<Notice>,
) -> VenueFormPage {
    VenueFormPage {
        notices,
        title: title.to_string(),
        action,
        states: state_options(&form.state),
        genres: genre_options(&form.genres),
        seeking: seeking_options(&form.seeking_talent),
        form,
        errors,
    }
}

/// GET /venues - venues grouped by city and state
async fn list_venues(
    State(state): State<Arc<AppState>>,
    flash: IncomingFlash,
) -> Result<impl IntoResponse, HttpError> {
    let areas = VenueRepo::new(&state.pool).areas(Utc::now()).await?;

    let page = VenuesPage {
        notices: flash.notices(),
        areas: areas.into_iter().map(AreaView::from).collect(),
    };
    Ok((flash.consume(), render(&page)?))
}

/// POST /venues/search - case-insensitive name search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    FormBody(fields): FormBody,
) -> Result<impl IntoResponse, HttpError> {
    let search_term = fields.text("search_term");
    let results = VenueRepo::new(&state.pool)
        .search(&search_term, Utc::now())
        .await?;

    let page = SearchPage {
        notices: Vec::new(),
        resource: "venues",
        count: results.len(),
        results: results.into_iter().map(ListedEntity::from).collect(),
        search_term,
    };
    render(&page)
}

/// GET /venues/{id} - venue profile with past and upcoming shows
async fn show_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: IncomingFlash,
) -> Result<impl IntoResponse, HttpError> {
    let detail = VenueRepo::new(&state.pool).detail(id, Utc::now()).await?;
    let tz = state.timezone;

    let page = ProfilePage {
        notices: flash.notices(),
        resource: "venues",
        seeking_label: "Seeking talent",
        deletable: true,
        past_shows_count: detail.shows.past_count(),
        upcoming_shows_count: detail.shows.upcoming_count(),
        past_shows: detail
            .shows
            .past
            .into_iter()
            .map(|s| LinkedShow::from_venue_show(s, tz))
            .collect(),
        upcoming_shows: detail
            .shows
            .upcoming
            .into_iter()
            .map(|s| LinkedShow::from_venue_show(s, tz))
            .collect(),
        profile: ProfileView::from(detail.venue),
    };
    Ok((flash.consume(), render(&page)?))
}

/// GET /venues/create - empty venue form
async fn create_venue_form() -> Result<impl IntoResponse, HttpError> {
    let page = form_page(
        "List a new venue",
        "/venues/create".into(),
        VenueForm::default(),
        Vec::new(),
        Vec::new(),
    );
    render(&page)
}

/// POST /venues/create - validate, insert, redirect home
async fn create_venue(
    State(state): State<Arc<AppState>>,
    FormBody(fields): FormBody,
) -> Result<Response, HttpError> {
    let form = VenueForm::from_fields(&fields);
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "venue form rejected");
            let page = form_page(
                "List a new venue",
                "/venues/create".into(),
                form,
                errors.messages(),
                Vec::new(),
            );
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    match VenueRepo::new(&state.pool).create(&new).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, name = %venue.name, "venue listed");
            let flash = Flash::new(format!("Venue {} was successfully listed!", venue.name));
            Ok((flash, Redirect::to("/")).into_response())
        }
        Err(e) => {
            log_mutation_failure("create venue", &e);
            let notice = Notice::error(format!(
                "An error occurred. Venue {} could not be listed.",
                new.name
            ));
            let page = form_page(
                "List a new venue",
                "/venues/create".into(),
                form,
                Vec::new(),
                vec![notice],
            );
            Ok((mutation_status(&e), render(&page)?).into_response())
        }
    }
}

/// GET /venues/{id}/edit - form prefilled from the stored venue
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, HttpError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;

    let page = form_page(
        "Edit venue",
        format!("/venues/{id}/edit"),
        venue_form(&venue),
        Vec::new(),
        Vec::new(),
    );
    render(&page)
}

/// POST /venues/{id}/edit - validate, update, redirect to the profile
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    FormBody(fields): FormBody,
) -> Result<Response, HttpError> {
    let form = VenueForm::from_fields(&fields);
    let action = format!("/venues/{id}/edit");

    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            tracing::warn!(venue_id = id, errors = errors.len(), "venue form rejected");
            let page = form_page("Edit venue", action, form, errors.messages(), Vec::new());
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    match VenueRepo::new(&state.pool).update(id, &new).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, name = %venue.name, "venue updated");
            let flash = Flash::new(format!("Venue {} was successfully updated!", venue.name));
            Ok((flash, Redirect::to(&format!("/venues/{id}"))).into_response())
        }
        Err(e) => {
            log_mutation_failure("update venue", &e);
            let notice = Notice::error(format!(
                "An error occurred. Venue {} could not be updated.",
                new.name
            ));
            let page = form_page("Edit venue", action, form, Vec::new(), vec![notice]);
            Ok((mutation_status(&e), render(&page)?).into_response())
        }
    }
}

/// DELETE /venues/{id} - delete venue and its shows, answer JSON
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    id: Result<EntityId, HttpError>,
) -> Response {
    let EntityId(id) = match id {
        Ok(id) => id,
        Err(e) => {
            let body = json!({ "success": false, "error": e.to_string() });
            return (StatusCode::NOT_FOUND, Json(body)).into_response();
        }
    };

    match VenueRepo::new(&state.pool).delete(id).await {
        Ok(deleted) => {
            tracing::info!(
                venue_id = deleted.id,
                name = %deleted.name,
                shows_removed = deleted.shows_removed,
                "venue deleted"
            );
            let flash = Flash::new(format!("Venue {} was successfully deleted!", deleted.name));
            let body = json!({
                "success": true,
                "deleted": {
                    "id": deleted.id,
                    "name": deleted.name,
                    "shows_removed": deleted.shows_removed,
                },
                "redirect": "/",
            });
            (flash, Json(body)).into_response()
        }
        Err(e) => {
            log_mutation_failure("delete venue", &e);
            let message = match &e {
                DbError::NotFound { .. } => e.to_string(),
                _ => format!("An error occurred. Venue {id} could not be deleted."),
            };
            let body = json!({ "success": false, "error": message });
            (mutation_status(&e), Json(body)).into_response()
        }
    }
}

/// POST /venues/{id}/delete - delete from the profile page's button
async fn delete_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Response, HttpError> {
    let deleted = VenueRepo::new(&state.pool).delete(id).await.map_err(|e| {
        log_mutation_failure("delete venue", &e);
        HttpError::from(e)
    })?;

    tracing::info!(
        venue_id = deleted.id,
        name = %deleted.name,
        shows_removed = deleted.shows_removed,
        "venue deleted"
    );
    let flash = Flash::new(format!("Venue {} was successfully deleted!", deleted.name));
    Ok((flash, Redirect::to("/")).into_response())
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
        .route("/venues/{id}/delete", post(delete_venue_form))
}
