//! Display Name Value Object
//!
//! Free-text profile claim attached to an account at registration.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DISPLAY_NAME_MAX_LENGTH: usize = 64;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request("Display name cannot be empty"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Display name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(|c| c.is_control()) {
            return Err(AppError::bad_request(
                "Display name contains invalid characters",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_valid() {
        assert!(DisplayName::new("Alice").is_ok());
        assert!(DisplayName::new("  Alice  ").is_ok());
        assert!(DisplayName::new("山田 太郎").is_ok());
    }

    #[test]
    fn test_display_name_invalid() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("a".repeat(65)).is_err());
        assert!(DisplayName::new("bad\u{0000}name").is_err());
    }

    #[test]
    fn test_display_name_trimmed() {
        let name = DisplayName::new("  Alice ").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }
}
