//! Form layer: raw submissions, per-field errors, and the venue, artist
//! and show forms.
//!
//! Every form keeps the raw submitted strings so it can be re-rendered
//! after a failed submission, and validates into a `New*` value that the
//! repositories accept. Handlers never see unvalidated input.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::contact::{optional_link, optional_phone};
use super::schedule::parse_start_time;
use super::seeking::parse_flag;
use super::validation::{optional_text, required_text};
use super::{Genre, StateCode, ValidationError};

const MAX_NAME_LEN: usize = 120;
const MAX_CITY_LEN: usize = 120;
const MAX_ADDRESS_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 500;

/// Decoded `application/x-www-form-urlencoded` body, repeated keys kept in order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or the empty string.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_owned()
    }

    /// Every value submitted for `key` (multi-selects).
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// Validation errors collected across a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    /// Record the error of a field result, returning the value if valid.
    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any error concerns `field`.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// Human-readable messages, one per error.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Validated venue ready for insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: StateCode,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist ready for insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: StateCode,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated show ready for insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Converts `Vec<Genre>` to the stored labels.
pub fn genre_labels(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.as_str().to_owned()).collect()
}

/// Venue form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: String,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.text("phone"),
            genres: fields.all("genres"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            website: fields.text("website"),
            seeking_talent: fields.text("seeking_talent"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Validate every field, collecting all errors.
    pub fn validate(&self) -> Result<NewVenue, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = errors.check(required_text("name", &self.name, MAX_NAME_LEN));
        let city = errors.check(required_text("city", &self.city, MAX_CITY_LEN));
        let state = errors.check(StateCode::new(&self.state));
        let address = errors.check(required_text("address", &self.address, MAX_ADDRESS_LEN));
        let phone = errors.check(optional_phone(&self.phone));
        let genres = errors.check(Genre::parse_selection(self.genres.iter().map(String::as_str)));
        let image_link = errors.check(optional_link("image_link", &self.image_link));
        let facebook_link = errors.check(optional_link("facebook_link", &self.facebook_link));
        let website = errors.check(optional_link("website", &self.website));
        let seeking_talent =
            errors.check(parse_flag("seeking_talent", Some(self.seeking_talent.as_str())));
        let seeking_description = errors.check(optional_text(
            "seeking_description",
            &self.seeking_description,
            MAX_DESCRIPTION_LEN,
        ));

        match (
            name,
            city,
            state,
            address,
            phone,
            genres,
            image_link,
            facebook_link,
            website,
            seeking_talent,
            seeking_description,
        ) {
            (
                Some(name),
                Some(city),
                Some(state),
                Some(address),
                Some(phone),
                Some(genres),
                Some(image_link),
                Some(facebook_link),
                Some(website),
                Some(seeking_talent),
                Some(seeking_description),
            ) => Ok(NewVenue {
                name,
                city,
                state,
                address,
                phone,
                genres,
                image_link,
                facebook_link,
                website,
                seeking_talent,
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}

/// Artist form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: String,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.text("phone"),
            genres: fields.all("genres"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            website: fields.text("website"),
            seeking_venue: fields.text("seeking_venue"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    pub fn validate(&self) -> Result<NewArtist, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = errors.check(required_text("name", &self.name, MAX_NAME_LEN));
        let city = errors.check(required_text("city", &self.city, MAX_CITY_LEN));
        let state = errors.check(StateCode::new(&self.state));
        let phone = errors.check(optional_phone(&self.phone));
        let genres = errors.check(Genre::parse_selection(self.genres.iter().map(String::as_str)));
        let image_link = errors.check(optional_link("image_link", &self.image_link));
        let facebook_link = errors.check(optional_link("facebook_link", &self.facebook_link));
        let website = errors.check(optional_link("website", &self.website));
        let seeking_venue =
            errors.check(parse_flag("seeking_venue", Some(self.seeking_venue.as_str())));
        let seeking_description = errors.check(optional_text(
            "seeking_description",
            &self.seeking_description,
            MAX_DESCRIPTION_LEN,
        ));

        match (
            name,
            city,
            state,
            phone,
            genres,
            image_link,
            facebook_link,
            website,
            seeking_venue,
            seeking_description,
        ) {
            (
                Some(name),
                Some(city),
                Some(state),
                Some(phone),
                Some(genres),
                Some(image_link),
                Some(facebook_link),
                Some(website),
                Some(seeking_venue),
                Some(seeking_description),
            ) => Ok(NewArtist {
                name,
                city,
                state,
                phone,
                genres,
                image_link,
                facebook_link,
                website,
                seeking_venue,
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}

/// Show form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    /// Validate against the display timezone used for naive start times.
    pub fn validate(&self, tz: Tz) -> Result<NewShow, FieldErrors> {
        let mut errors = FieldErrors::default();

        let artist_id = errors.check(parse_id("artist_id", &self.artist_id));
        let venue_id = errors.check(parse_id("venue_id", &self.venue_id));
        let start_time = errors.check(parse_start_time(&self.start_time, tz));

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => {
                Ok(NewShow {
                    venue_id,
                    artist_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Parse a positive row id.
pub fn parse_id(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}
