//! Genre tags shared by venues and artists

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Fixed list of genres a venue or artist can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RnB,
    Reggae,
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Genre; 19] = [
        Self::Alternative,
        Self::Blues,
        Self::Classical,
        Self::Country,
        Self::Electronic,
        Self::Folk,
        Self::Funk,
        Self::HipHop,
        Self::HeavyMetal,
        Self::Instrumental,
        Self::Jazz,
        Self::MusicalTheatre,
        Self::Pop,
        Self::Punk,
        Self::RnB,
        Self::Reggae,
        Self::RockNRoll,
        Self::Soul,
        Self::Other,
    ];

    /// Label stored in the database and shown in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RnB => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }

    /// Parse a non-empty multi-select submission, dropping duplicates
    /// while keeping the submitted order.
    pub fn parse_selection<'a, I>(values: I) -> Result<Vec<Genre>, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut genres = Vec::new();
        for value in values {
            let genre = value.parse::<Genre>()?;
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }

        if genres.is_empty() {
            return Err(ValidationError::Empty { field: "genres" });
        }

        Ok(genres)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "genres",
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn rejects_unknown_genre() {
        let err = "Polka".parse::<Genre>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "genres", .. }));
    }

    #[test]
    fn selection_keeps_order_and_drops_duplicates() {
        let genres = Genre::parse_selection(["Jazz", "R&B", "Jazz"]).unwrap();
        assert_eq!(genres, vec![Genre::Jazz, Genre::RnB]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = Genre::parse_selection(std::iter::empty()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "genres" });
    }
}
