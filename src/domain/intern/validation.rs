//! Intern validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during intern validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InternValidationError {
    #[error("Intern ID cannot be empty")]
    EmptyId,

    #[error("Intern ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Email is required")]
    EmptyEmail,

    #[error("Email '{0}' is not a valid address")]
    InvalidEmail(String),
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Validate an intern ID
pub fn validate_intern_id(id: &str) -> Result<(), InternValidationError> {
    if id.is_empty() {
        return Err(InternValidationError::EmptyId);
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(InternValidationError::InvalidIdCharacters);
    }

    Ok(())
}

/// Normalize an email the way it is stored: trimmed and lowercased
pub fn normalize_email(email: &str) -> Result<String, InternValidationError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(InternValidationError::EmptyEmail);
    }

    if !EMAIL_PATTERN.is_match(&email) {
        return Err(InternValidationError::InvalidEmail(email));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_intern_id() {
        assert!(validate_intern_id("intern-1").is_ok());
        assert_eq!(validate_intern_id(""), Err(InternValidationError::EmptyId));
        assert_eq!(
            validate_intern_id("intern 1"),
            Err(InternValidationError::InvalidIdCharacters)
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(normalize_email("   "), Err(InternValidationError::EmptyEmail));
        assert!(matches!(
            normalize_email("ada.example.com"),
            Err(InternValidationError::InvalidEmail(_))
        ));
        assert!(matches!(
            normalize_email("ada@localhost"),
            Err(InternValidationError::InvalidEmail(_))
        ));
    }
}
