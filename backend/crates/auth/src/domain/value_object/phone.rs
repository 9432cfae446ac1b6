//! Phone Value Object
//!
//! Optional profile claim. Stored in a normalized digits-only form
//! (with an optional leading +).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// Phone number value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    /// Create a new phone number with validation
    ///
    /// Accepts digits with optional separators (spaces, dashes, dots,
    /// parentheses) and an optional leading +; separators are stripped.
    pub fn new(phone: impl Into<String>) -> AppResult<Self> {
        let raw = phone.into();
        let trimmed = raw.trim();

        let (prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };

        let mut digits = String::new();
        for ch in rest.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(AppError::bad_request("Invalid phone number")),
            }
        }

        let count = digits.len();
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&count) {
            return Err(AppError::bad_request(format!(
                "Phone number must have {} to {} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            )));
        }

        Ok(Self(format!("{}{}", prefix, digits)))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
