//! US state codes for venue and artist locations

use super::ValidationError;

/// Accepted two-letter codes: the 50 states plus DC.
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Validated state code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateCode(String);

impl StateCode {
    /// Create a state code. Input is trimmed and upper-cased before lookup.
    ///
    /// # Example
    /// ```
    /// use gigboard_server::models::StateCode;
    ///
    /// assert_eq!(StateCode::new("ca").unwrap().as_str(), "CA");
    /// assert!(StateCode::new("XX").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let code = s.trim().to_ascii_uppercase();

        if code.is_empty() {
            return Err(ValidationError::Empty { field: "state" });
        }

        if !STATE_CODES.contains(&code.as_str()) {
            return Err(ValidationError::InvalidVariant {
                field: "state",
                value: s.to_owned(),
            });
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
