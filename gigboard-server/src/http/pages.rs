//! Askama page templates
//!
//! Every page extends `layouts/main.html`, which reads `notices`. Error
//! pages are standalone and take no data beyond an optional message.

use askama::Template;
use axum::response::Html;

use super::error::HttpError;
use super::views::{AreaView, LinkedShow, ListedEntity, Notice, ProfileView, SelectOption, ShowRow};
use crate::models::{ArtistForm, VenueForm};

/// Render a page into an HTML response body.
pub fn render<T: Template>(page: &T) -> Result<Html<String>, HttpError> {
    Ok(Html(page.render()?))
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage {
    pub notices: Vec<Notice>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesPage {
    pub notices: Vec<Notice>,
    pub areas: Vec<AreaView>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsPage {
    pub notices: Vec<Notice>,
    pub artists: Vec<ListedEntity>,
}

/// Search results for either venues or artists
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchPage {
    pub notices: Vec<Notice>,
    /// "venues" or "artists", used for headings and links
    pub resource: &'static str,
    pub search_term: String,
    pub count: usize,
    pub results: Vec<ListedEntity>,
}

/// Venue or artist profile with its shows
#[derive(Template)]
#[template(path = "pages/profile.html")]
pub struct ProfilePage {
    pub notices: Vec<Notice>,
    pub resource: &'static str,
    pub profile: ProfileView,
    /// "Seeking talent" or "Seeking performance venues"
    pub seeking_label: &'static str,
    pub deletable: bool,
    pub past_shows: Vec<LinkedShow>,
    pub upcoming_shows: Vec<LinkedShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsPage {
    pub notices: Vec<Notice>,
    pub shows: Vec<ShowRow>,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormPage {
    pub notices: Vec<Notice>,
    pub title: String,
    pub action: String,
    pub form: VenueForm,
    pub states: Vec<SelectOption>,
    pub genres: Vec<SelectOption>,
    pub seeking: Vec<SelectOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormPage {
    pub notices: Vec<Notice>,
    pub title: String,
    pub action: String,
    pub form: ArtistForm,
    pub states: Vec<SelectOption>,
    pub genres: Vec<SelectOption>,
    pub seeking: Vec<SelectOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormPage {
    pub notices: Vec<Notice>,
    pub artists: Vec<SelectOption>,
    pub venues: Vec<SelectOption>,
    pub start_time: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "errors/400.html")]
pub struct BadRequestPage {
    pub message: String,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundPage;

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorPage;

#[derive(Template)]
#[template(path = "errors/503.html")]
pub struct UnavailablePage;
