//! Yes/no select values for "seeking talent" and "seeking venue"

use super::ValidationError;

/// Parse a seeking flag submitted as the literal `true` or `false`.
///
/// Anything else (including a missing field) is rejected instead of
/// being read as `false`.
pub fn parse_flag(field: &'static str, value: Option<&str>) -> Result<bool, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Err(ValidationError::Empty { field }),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ValidationError::InvalidVariant {
            field,
            value: other.to_owned(),
        }),
    }
}

/// Form value for a flag.
pub fn flag_value(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}
