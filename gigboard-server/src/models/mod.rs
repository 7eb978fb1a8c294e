//! Domain values with validation at construction
//!
//! All user input passes through these types before it reaches a
//! repository. Invalid input returns `ValidationError`, never panics.

pub mod validation;
pub mod genre;
pub mod us_state;
pub mod contact;
pub mod seeking;
pub mod schedule;
pub mod forms;

pub use validation::ValidationError;
pub use genre::Genre;
pub use us_state::{StateCode, STATE_CODES};
pub use schedule::{DateStyle, Partitioned};
pub use forms::{
    ArtistForm, FieldErrors, FormFields, NewArtist, NewShow, NewVenue, ShowForm, VenueForm,
};
