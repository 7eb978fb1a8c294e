//! Artist pages: listing, search, profile, create and edit

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;

use crate::db::repos::ArtistRepo;
use crate::http::error::{log_mutation_failure, mutation_status, HttpError};
use crate::http::extractors::{EntityId, FormBody};
use crate::http::flash::{Flash, IncomingFlash};
use crate::http::pages::{render, ArtistFormPage, ArtistsPage, ProfilePage, SearchPage};
use crate::http::server::AppState;
use crate::http::views::{
    artist_form, genre_options, seeking_options, state_options, LinkedShow, ListedEntity, Notice,
    ProfileView,
};
use crate::models::ArtistForm;

fn form_page(
    title: &str,
    action: String,
    form: ArtistForm,
    errors: Vec<String>,
    notices: Vec<Notice>,
) -> ArtistFormPage {
    ArtistFormPage {
        notices,
        title: title.to_string(),
        action,
        states: state_options(&form.state),
        genres: genre_options(&form.genres),
        seeking: seeking_options(&form.seeking_venue),
        form,
        errors,
    }
}

/// GET /artists - every artist by name
async fn list_artists(
    State(state): State<Arc<AppState>>,
    flash: IncomingFlash,
) -> Result<impl IntoResponse, HttpError> {
    let artists = ArtistRepo::new(&state.pool).list(Utc::now()).await?;

    let page = ArtistsPage {
        notices: flash.notices(),
        artists: artists.into_iter().map(ListedEntity::from).collect(),
    };
    Ok((flash.consume(), render(&page)?))
}

/// POST /artists/search - case-insensitive name search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    FormBody(fields): FormBody,
) -> Result<impl IntoResponse, HttpError> {
    let search_term = fields.text("search_term");
    let results = ArtistRepo::new(&state.pool)
        .search(&search_term, Utc::now())
        .await?;

    let page = SearchPage {
        notices: Vec::new(),
        resource: "artists",
        count: results.len(),
        results: results.into_iter().map(ListedEntity::from).collect(),
        search_term,
    };
    render(&page)
}

/// GET /artists/{id} - artist profile with past and upcoming shows
async fn show_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: IncomingFlash,
) -> Result<impl IntoResponse, HttpError> {
    let detail = ArtistRepo::new(&state.pool).detail(id, Utc::now()).await?;
    let tz = state.timezone;

    let page = ProfilePage {
        notices: flash.notices(),
        resource: "artists",
        seeking_label: "Seeking performance venues",
        deletable: false,
        past_shows_count: detail.shows.past_count(),
        upcoming_shows_count: detail.shows.upcoming_count(),
        past_shows: detail
            .shows
            .past
            .into_iter()
            .map(|s| LinkedShow::from_artist_show(s, tz))
            .collect(),
        upcoming_shows: detail
            .shows
            .upcoming
            .into_iter()
            .map(|s| LinkedShow::from_artist_show(s, tz))
            .collect(),
        profile: ProfileView::from(detail.artist),
    };
    Ok((flash.consume(), render(&page)?))
}

/// GET /artists/create - empty artist form
async fn create_artist_form() -> Result<impl IntoResponse, HttpError> {
    let page = form_page(
        "List a new artist",
        "/artists/create".into(),
        ArtistForm::default(),
        Vec::new(),
        Vec::new(),
    );
    render(&page)
}

/// POST /artists/create - validate, insert, redirect home
async fn create_artist(
    State(state): State<Arc<AppState>>,
    FormBody(fields): FormBody,
) -> Result<Response, HttpError> {
    let form = ArtistForm::from_fields(&fields);
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "artist form rejected");
            let page = form_page(
                "List a new artist",
                "/artists/create".into(),
                form,
                errors.messages(),
                Vec::new(),
            );
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    match ArtistRepo::new(&state.pool).create(&new).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, name = %artist.name, "artist listed");
            let flash = Flash::new(format!("Artist {} was successfully listed!", artist.name));
            Ok((flash, Redirect::to("/")).into_response())
        }
        Err(e) => {
            log_mutation_failure("create artist", &e);
            let notice = Notice::error(format!(
                "An error occurred. Artist {} could not be listed.",
                new.name
            ));
            let page = form_page(
                "List a new artist",
                "/artists/create".into(),
                form,
                Vec::new(),
                vec![notice],
            );
            Ok((mutation_status(&e), render(&page)?).into_response())
        }
    }
}

/// GET /artists/{id}/edit - form prefilled from the stored artist
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, HttpError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;

    let page = form_page(
        "Edit artist",
        format!("/artists/{id}/edit"),
        artist_form(&artist),
        Vec::new(),
        Vec::new(),
    );
    render(&page)
}

/// POST /artists/{id}/edit - validate, update, redirect to the profile
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    FormBody(fields): FormBody,
) -> Result<Response, HttpError> {
    let form = ArtistForm::from_fields(&fields);
    let action = format!("/artists/{id}/edit");

    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            tracing::warn!(artist_id = id, errors = errors.len(), "artist form rejected");
            let page = form_page("Edit artist", action, form, errors.messages(), Vec::new());
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    match ArtistRepo::new(&state.pool).update(id, &new).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, name = %artist.name, "artist updated");
            let flash = Flash::new(format!("Artist {} was successfully updated!", artist.name));
            Ok((flash, Redirect::to(&format!("/artists/{id}"))).into_response())
        }
        Err(e) => {
            log_mutation_failure("update artist", &e);
            let notice = Notice::error(format!(
                "An error occurred. Artist {} could not be updated.",
                new.name
            ));
            let page = form_page("Edit artist", action, form, Vec::new(), vec![notice]);
            Ok((mutation_status(&e), render(&page)?).into_response())
        }
    }
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
