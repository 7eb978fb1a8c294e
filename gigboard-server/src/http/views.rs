//! View models handed to templates
//!
//! Templates only see plain strings, numbers and flags. Optional columns
//! become empty strings and start times are formatted here, in the
//! display timezone.

use chrono_tz::Tz;

use crate::db::repos::{
    Area, Artist, ArtistShow, ArtistSummary, EntityOption, ShowListing, Venue, VenueShow,
    VenueSummary,
};
use crate::models::schedule::{format_start_time, DateStyle};
use crate::models::seeking::flag_value;
use crate::models::{ArtistForm, Genre, VenueForm, STATE_CODES};

/// One line in the notice area at the top of each page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: &'static str,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success",
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error",
            text: text.into(),
        }
    }
}

/// A venue or artist in a list, with its upcoming show count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntity {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub num_upcoming_shows: i64,
}

impl From<VenueSummary> for ListedEntity {
    fn from(v: VenueSummary) -> Self {
        Self {
            id: v.id,
            location: format!("{}, {}", v.city, v.state),
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        }
    }
}

impl From<ArtistSummary> for ListedEntity {
    fn from(a: ArtistSummary) -> Self {
        Self {
            id: a.id,
            location: format!("{}, {}", a.city, a.state),
            name: a.name,
            num_upcoming_shows: a.num_upcoming_shows,
        }
    }
}

/// Venues of one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaView {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListedEntity>,
}

impl From<Area> for AreaView {
    fn from(area: Area) -> Self {
        Self {
            city: area.city,
            state: area.state,
            venues: area.venues.into_iter().map(ListedEntity::from).collect(),
        }
    }
}

/// A show on a detail page, linking to the other side of the booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedShow {
    pub href: String,
    pub name: String,
    pub image_link: String,
    pub start_time: String,
}

impl LinkedShow {
    pub fn from_venue_show(show: VenueShow, tz: Tz) -> Self {
        Self {
            href: format!("/artists/{}", show.artist_id),
            name: show.artist_name,
            image_link: show.artist_image_link.unwrap_or_default(),
            start_time: format_start_time(show.start_time, tz, DateStyle::Full),
        }
    }

    pub fn from_artist_show(show: ArtistShow, tz: Tz) -> Self {
        Self {
            href: format!("/venues/{}", show.venue_id),
            name: show.venue_name,
            image_link: show.venue_image_link.unwrap_or_default(),
            start_time: format_start_time(show.start_time, tz, DateStyle::Full),
        }
    }
}

/// A row on the show listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl ShowRow {
    pub fn new(show: ShowListing, tz: Tz) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link.unwrap_or_default(),
            start_time: format_start_time(show.start_time, tz, DateStyle::Medium),
        }
    }
}

/// Shared profile fields of venues and artists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking: bool,
    pub seeking_description: String,
}

impl From<Venue> for ProfileView {
    fn from(v: Venue) -> Self {
        Self {
            id: v.id,
            name: v.name,
            genres: v.genres,
            address: v.address.unwrap_or_default(),
            city: v.city,
            state: v.state,
            phone: v.phone.unwrap_or_default(),
            website: v.website.unwrap_or_default(),
            facebook_link: v.facebook_link.unwrap_or_default(),
            image_link: v.image_link.unwrap_or_default(),
            seeking: v.seeking_talent,
            seeking_description: v.seeking_description.unwrap_or_default(),
        }
    }
}

impl From<Artist> for ProfileView {
    fn from(a: Artist) -> Self {
        Self {
            id: a.id,
            name: a.name,
            genres: a.genres,
            address: String::new(),
            city: a.city,
            state: a.state,
            phone: a.phone.unwrap_or_default(),
            website: a.website.unwrap_or_default(),
            facebook_link: a.facebook_link.unwrap_or_default(),
            image_link: a.image_link.unwrap_or_default(),
            seeking: a.seeking_venue,
            seeking_description: a.seeking_description.unwrap_or_default(),
        }
    }
}

/// `<option>` in a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// State select, with `selected` matched case-insensitively.
pub fn state_options(selected: &str) -> Vec<SelectOption> {
    let selected = selected.trim();
    STATE_CODES
        .iter()
        .map(|code| SelectOption {
            value: code.to_string(),
            label: code.to_string(),
            selected: code.eq_ignore_ascii_case(selected),
        })
        .collect()
}

/// Genre multi-select, one option per known genre.
pub fn genre_options(selected: &[String]) -> Vec<SelectOption> {
    Genre::ALL
        .iter()
        .map(|genre| SelectOption {
            value: genre.as_str().to_string(),
            label: genre.as_str().to_string(),
            selected: selected.iter().any(|s| s == genre.as_str()),
        })
        .collect()
}

/// The yes/no seeking select. Nothing is preselected for a blank form.
pub fn seeking_options(selected: &str) -> Vec<SelectOption> {
    [(true, "Yes"), (false, "No")]
        .into_iter()
        .map(|(flag, label)| SelectOption {
            value: flag_value(flag).to_string(),
            label: label.to_string(),
            selected: selected.trim() == flag_value(flag),
        })
        .collect()
}

/// Id/name select for the show form.
pub fn entity_options(options: Vec<EntityOption>, selected: &str) -> Vec<SelectOption> {
    let selected = selected.trim();
    options
        .into_iter()
        .map(|o| {
            let value = o.id.to_string();
            SelectOption {
                selected: value == selected,
                label: format!("{} (#{})", o.name, o.id),
                value,
            }
        })
        .collect()
}

/// Venue form prefilled from the stored row.
pub fn venue_form(venue: &Venue) -> VenueForm {
    VenueForm {
        name: venue.name.clone(),
        city: venue.city.clone(),
        state: venue.state.clone(),
        address: venue.address.clone().unwrap_or_default(),
        phone: venue.phone.clone().unwrap_or_default(),
        genres: venue.genres.clone(),
        image_link: venue.image_link.clone().unwrap_or_default(),
        facebook_link: venue.facebook_link.clone().unwrap_or_default(),
        website: venue.website.clone().unwrap_or_default(),
        seeking_talent: flag_value(venue.seeking_talent).to_string(),
        seeking_description: venue.seeking_description.clone().unwrap_or_default(),
    }
}

/// Artist form prefilled from the stored row.
pub fn artist_form(artist: &Artist) -> ArtistForm {
    ArtistForm {
        name: artist.name.clone(),
        city: artist.city.clone(),
        state: artist.state.clone(),
        phone: artist.phone.clone().unwrap_or_default(),
        genres: artist.genres.clone(),
        image_link: artist.image_link.clone().unwrap_or_default(),
        facebook_link: artist.facebook_link.clone().unwrap_or_default(),
        website: artist.website.clone().unwrap_or_default(),
        seeking_venue: flag_value(artist.seeking_venue).to_string(),
        seeking_description: artist.seeking_description.clone().unwrap_or_default(),
    }
}
