//! Validation error types

use std::fmt;

/// Validation error for submitted fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the expected format (URL, phone, timestamp...)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value is not one of the allowed choices
    InvalidVariant { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a required text field: trimmed, non-empty, bounded length.
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Validate an optional text field. Blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match required_text(field, value, max) {
        Ok(text) => Ok(Some(text)),
        Err(ValidationError::Empty { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 120 characters"
        );
        assert_eq!(
            ValidationError::Empty { field: "city" }.to_string(),
            "city is required"
        );
    }

    #[test]
    fn field_accessor() {
        let err = ValidationError::InvalidVariant {
            field: "genres",
            value: "Polka".into(),
        };
        assert_eq!(err.field(), "genres");
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  The Hop ", 10).unwrap(), "The Hop");
        assert_eq!(
            required_text("name", "   ", 10).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn length_counts_characters() {
        // five characters, more than five bytes
        assert!(required_text("name", "Café!", 5).is_ok());
        assert!(matches!(
            required_text("name", "Café!!", 5).unwrap_err(),
            ValidationError::TooLong { max: 5, .. }
        ));
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional_text("phone", "", 32).unwrap(), None);
        assert_eq!(optional_text("phone", "  ", 32).unwrap(), None);
        assert_eq!(
            optional_text("phone", "555", 32).unwrap(),
            Some("555".to_owned())
        );
        assert!(optional_text("phone", &"1".repeat(33), 32).is_err());
    }
}
