//! Client-side form validation.
//!
//! These checks run before any network call so obviously-bad input fails
//! inline. The server's own validation is authoritative; a record that
//! passes here can still be rejected remotely.

use crate::error::{Result, SessionError};

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reject empty or whitespace-only values.
pub fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SessionError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject strings that are not shaped like an email address.
pub fn require_email_shape(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(SessionError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

/// Reject passwords shorter than [`MIN_PASSWORD_LEN`].
pub fn require_password_length(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SessionError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert!(require_non_empty("value", "field").is_ok());
        assert!(require_non_empty("", "field").is_err());
        assert!(require_non_empty("   ", "field").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(require_email_shape("john@example.com").is_ok());
        assert!(require_email_shape("a@b.co").is_ok());

        assert!(require_email_shape("not-an-email").is_err());
        assert!(require_email_shape("@example.com").is_err());
        assert!(require_email_shape("john@").is_err());
        assert!(require_email_shape("john@nodot").is_err());
        assert!(require_email_shape("john@.com").is_err());
        assert!(require_email_shape("john@example.").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(require_password_length("secret").is_ok());
        assert!(require_password_length("12345").is_err());
        assert!(require_password_length("").is_err());
    }
}
