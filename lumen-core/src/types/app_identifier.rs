//! Application identifier type.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for an application.
///
/// The identifier is a non-empty string of ASCII alphanumerics, hyphens,
/// underscores, and dots (reverse-DNS style ids are common). It is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppIdentifier(String);

impl AppIdentifier {
    /// Creates a new `AppIdentifier`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the value is empty or contains
    /// characters outside the allowed set.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        if value.is_empty() {
            return Err(CoreError::InvalidInput(
                "AppIdentifier cannot be empty".to_string(),
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(CoreError::InvalidInput(format!(
                "AppIdentifier '{}' contains invalid characters",
                value
            )));
        }
        Ok(AppIdentifier(value.to_string()))
    }

    /// Returns the underlying string value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AppIdentifier> for String {
    fn from(app_id: AppIdentifier) -> Self {
        app_id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reverse_dns_ids() {
        let id = AppIdentifier::new("org.example.gallery-app").unwrap();
        assert_eq!(id.value(), "org.example.gallery-app");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(AppIdentifier::new("").is_err());
        assert!(AppIdentifier::new("my app").is_err());
    }
}
