//! Venue repository
//!
//! - areas: venues grouped by (city, state), one JOIN query
//! - search: case-insensitive containment, evaluated by Postgres
//! - detail: venue plus its shows split into past/upcoming
//! - create/update/delete: one transaction each

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{DbError, EntityOption};
use crate::models::forms::genre_labels;
use crate::models::schedule::partition_by_start;
use crate::models::{NewVenue, Partitioned};

/// Venue record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Venue with upcoming show count for list display
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair, ordered by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show as seen from its venue
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueShow {
    pub show_id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Venue with its shows split around the query instant
#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub shows: Partitioned<VenueShow>,
}

/// What a delete removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedVenue {
    pub id: i64,
    pub name: String,
    pub shows_removed: u64,
}

/// Group summaries already sorted by (state, city, id) into areas.
pub fn group_into_areas(rows: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for row in rows {
        match areas.last_mut() {
            Some(area) if area.city == row.city && area.state == row.state => {
                area.venues.push(row);
            }
            _ => areas.push(Area {
                city: row.city.clone(),
                state: row.state.clone(),
                venues: vec![row],
            }),
        }
    }

    areas
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues grouped into areas, with upcoming show counts.
    ///
    /// Uses LEFT JOIN to get counts in a single query (no N+1).
    pub async fn areas(&self, now: DateTime<Utc>) -> Result<Vec<Area>, DbError> {
        let rows: Vec<VenueSummary> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(group_into_areas(rows))
    }

    /// Venues whose name contains `term`, ignoring case.
    ///
    /// `strpos` keeps `%` and `_` literal, unlike LIKE patterns.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows: Vec<VenueSummary> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE strpos(lower(v.name), lower($2)) > 0
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .bind(term)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        let venue: Option<Venue> = sqlx::query_as(
            r#"
            SELECT id, name, city, state, address, phone, genres, image_link,
                   facebook_link, website, seeking_talent, seeking_description, created_at
            FROM venues
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        venue.ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Shows booked at a venue, earliest first.
    pub async fn shows(&self, id: i64) -> Result<Vec<VenueShow>, DbError> {
        let rows: Vec<VenueShow> = sqlx::query_as(
            r#"
            SELECT
                s.id AS show_id,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Venue with shows classified against `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> Result<VenueDetail, DbError> {
        let venue = self.get(id).await?;
        let shows = self.shows(id).await?;

        Ok(VenueDetail {
            venue,
            shows: partition_by_start(shows, now, |s| s.start_time),
        })
    }

    /// Insert a venue.
    pub async fn create(&self, new: &NewVenue) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, genres, image_link,
                facebook_link, website, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, city, state, address, phone, genres, image_link,
                      facebook_link, website, seeking_talent, seeking_description, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.address)
        .bind(new.phone.as_deref())
        .bind(genre_labels(&new.genres))
        .bind(new.image_link.as_deref())
        .bind(new.facebook_link.as_deref())
        .bind(new.website.as_deref())
        .bind(new.seeking_talent)
        .bind(new.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Replace every editable field of a venue.
    pub async fn update(&self, id: i64, new: &NewVenue) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                genres = $7,
                image_link = $8,
                facebook_link = $9,
                website = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING id, name, city, state, address, phone, genres, image_link,
                      facebook_link, website, seeking_talent, seeking_description, created_at
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.address)
        .bind(new.phone.as_deref())
        .bind(genre_labels(&new.genres))
        .bind(new.image_link.as_deref())
        .bind(new.facebook_link.as_deref())
        .bind(new.website.as_deref())
        .bind(new.seeking_talent)
        .bind(new.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue and every show booked there.
    ///
    /// The venue row is locked first so no show can be booked between the
    /// two deletes.
    pub async fn delete(&self, id: i64) -> Result<DeletedVenue, DbError> {
        let mut tx = self.pool.begin().await?;

        let name: String = sqlx::query_scalar("SELECT name FROM venues WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))?;

        let shows_removed = sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DeletedVenue {
            id,
            name,
            shows_removed,
        })
    }

    /// Every venue as an id/name pair, for the show form.
    pub async fn options(&self) -> Result<Vec<EntityOption>, DbError> {
        let rows: Vec<EntityOption> = sqlx::query_as("SELECT id, name FROM venues ORDER BY name, id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}
