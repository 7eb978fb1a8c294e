//! Phone numbers and external links

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::optional_text;
use super::ValidationError;

/// Maximum length for a link
const MAX_LINK_LEN: usize = 500;

/// Maximum length for a phone number
const MAX_PHONE_LEN: usize = 32;

/// Absolute http(s) URL whose host has a dot-separated suffix.
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}(:\d{1,5})?([/?#]\S*)?$")
        .expect("invalid link regex")
});

/// Digits plus the usual separators, with at least one digit.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9 ().-]*[0-9][0-9 ().-]*$").expect("invalid phone regex"));

/// Parse an optional link field. Blank input is `None`.
pub fn optional_link(field: &'static str, value: &str) -> Result<Option<String>, ValidationError> {
    let Some(link) = optional_text(field, value, MAX_LINK_LEN)? else {
        return Ok(None);
    };

    if !LINK_RE.is_match(&link) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an http(s) URL",
        });
    }

    Ok(Some(link))
}

/// Parse an optional phone field. Blank input is `None`.
pub fn optional_phone(value: &str) -> Result<Option<String>, ValidationError> {
    let Some(phone) = optional_text("phone", value, MAX_PHONE_LEN)? else {
        return Ok(None);
    };

    if !PHONE_RE.is_match(&phone) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "may only contain digits, spaces and + - ( ) .",
        });
    }

    Ok(Some(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_links() {
        for link in [
            "https://www.themusicalhop.com",
            "http://example.org/path?q=1",
            "https://www.facebook.com/TheMusicalHop",
            "https://images.unsplash.com/photo-1543900694?ixlib=rb-1.2.1&w=400",
            "http://localhost.dev:8080/",
        ] {
            assert!(optional_link("website", link).unwrap().is_some(), "{link}");
        }
    }

    #[test]
    fn rejects_bad_links() {
        for link in ["ftp://example.com", "example.com", "https://nodot", "https:// spaced.com"] {
            let err = optional_link("website", link).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "website", .. }),
                "{link}"
            );
        }
    }

    #[test]
    fn blank_link_is_none() {
        assert_eq!(optional_link("image_link", "  ").unwrap(), None);
    }

    #[test]
    fn phone_numbers() {
        assert_eq!(
            optional_phone("123-123-1234").unwrap().as_deref(),
            Some("123-123-1234")
        );
        assert!(optional_phone("+1 (415) 000.1234").unwrap().is_some());
        assert_eq!(optional_phone("").unwrap(), None);
        assert!(optional_phone("call me").is_err());
        assert!(optional_phone("---").is_err());
    }
}
