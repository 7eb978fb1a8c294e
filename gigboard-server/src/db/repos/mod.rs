//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Checks referenced rows inside the same transaction as the write
//! - Uses one transaction per mutation; an uncommitted transaction rolls
//!   back when dropped, so every early return leaves the tables untouched

pub mod error;
pub mod venues;
pub mod artists;
pub mod shows;

use sqlx::FromRow;

pub use error::DbError;
pub use venues::{group_into_areas, Area, DeletedVenue, Venue, VenueDetail, VenueRepo, VenueShow, VenueSummary};
pub use artists::{Artist, ArtistDetail, ArtistRepo, ArtistShow, ArtistSummary};
pub use shows::{Show, ShowListing, ShowRepo};

/// Id and name pair for select boxes
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EntityOption {
    pub id: i64,
    pub name: String,
}
