//! Show repository
//!
//! A show books one artist into one venue at a start time. Creation
//! verifies both references inside the insert transaction; overlapping
//! bookings at the same venue are allowed.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::NewShow;

/// Show record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Show joined with the names the listing page needs
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show, earliest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows: Vec<ShowListing> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                v.id AS venue_id,
                v.name AS venue_name,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Book an artist into a venue.
    ///
    /// Returns `DbError::NotFound` naming whichever reference is missing.
    pub async fn create(&self, new: &NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        // KEY SHARE keeps both rows alive until commit
        let venue_exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM venues WHERE id = $1 FOR KEY SHARE")
                .bind(new.venue_id)
                .fetch_optional(&mut *tx)
                .await?;

        if venue_exists.is_none() {
            return Err(DbError::not_found("venue", new.venue_id));
        }

        let artist_exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM artists WHERE id = $1 FOR KEY SHARE")
                .bind(new.artist_id)
                .fetch_optional(&mut *tx)
                .await?;

        if artist_exists.is_none() {
            return Err(DbError::not_found("artist", new.artist_id));
        }

        let show: Show = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, venue_id, artist_id, start_time, created_at
            "#,
        )
        .bind(new.venue_id)
        .bind(new.artist_id)
        .bind(new.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(show)
    }
}
