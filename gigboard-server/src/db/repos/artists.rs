//! Artist repository
//!
//! Mirrors the venue repository minus delete: artists are listed by
//! name, searched by name, shown with their bookings and edited in place.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{DbError, EntityOption};
use crate::models::forms::genre_labels;
use crate::models::schedule::partition_by_start;
use crate::models::{NewArtist, Partitioned};

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Artist with upcoming show count for list display
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// A show as seen from its artist
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArtistShow {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Artist with their shows split around the query instant
#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub shows: Partitioned<ArtistShow>,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All artists ordered by name, with upcoming show counts.
    pub async fn list(&self, now: DateTime<Utc>) -> Result<Vec<ArtistSummary>, DbError> {
        let rows: Vec<ArtistSummary> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                a.city,
                a.state,
                COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            GROUP BY a.id
            ORDER BY a.name, a.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Artists whose name contains `term`, ignoring case.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let rows: Vec<ArtistSummary> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                a.city,
                a.state,
                COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE strpos(lower(a.name), lower($2)) > 0
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(term)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        let artist: Option<Artist> = sqlx::query_as(
            r#"
            SELECT id, name, city, state, phone, genres, image_link, facebook_link,
                   website, seeking_venue, seeking_description, created_at
            FROM artists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        artist.ok_or_else(|| DbError::not_found("artist", id))
    }

    /// Shows an artist is booked into, earliest first.
    pub async fn shows(&self, id: i64) -> Result<Vec<ArtistShow>, DbError> {
        let rows: Vec<ArtistShow> = sqlx::query_as(
            r#"
            SELECT
                s.id AS show_id,
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Artist with shows classified against `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> Result<ArtistDetail, DbError> {
        let artist = self.get(id).await?;
        let shows = self.shows(id).await?;

        Ok(ArtistDetail {
            artist,
            shows: partition_by_start(shows, now, |s| s.start_time),
        })
    }

    /// Insert an artist.
    pub async fn create(&self, new: &NewArtist) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, image_link, facebook_link,
                website, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, city, state, phone, genres, image_link, facebook_link,
                      website, seeking_venue, seeking_description, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(new.phone.as_deref())
        .bind(genre_labels(&new.genres))
        .bind(new.image_link.as_deref())
        .bind(new.facebook_link.as_deref())
        .bind(new.website.as_deref())
        .bind(new.seeking_venue)
        .bind(new.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Replace every editable field of an artist.
    pub async fn update(&self, id: i64, new: &NewArtist) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                genres = $6,
                image_link = $7,
                facebook_link = $8,
                website = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING id, name, city, state, phone, genres, image_link, facebook_link,
                      website, seeking_venue, seeking_description, created_at
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(new.phone.as_deref())
        .bind(genre_labels(&new.genres))
        .bind(new.image_link.as_deref())
        .bind(new.facebook_link.as_deref())
        .bind(new.website.as_deref())
        .bind(new.seeking_venue)
        .bind(new.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Every artist as an id/name pair, for the show form.
    pub async fn options(&self) -> Result<Vec<EntityOption>, DbError> {
        let rows: Vec<EntityOption> =
            sqlx::query_as("SELECT id, name FROM artists ORDER BY name, id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows)
    }
}
