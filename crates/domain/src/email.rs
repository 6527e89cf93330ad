use fintrack_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum accepted email length (RFC 5321 path limit).
const EMAIL_MAX_LENGTH: usize = 254;

/// Validated, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Structural check only: one `@`, non-empty local part, and a domain
    /// containing a `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain an '@'".to_owned(),
            ));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@' and a local part".to_owned(),
            ));
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if normalized.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "email address must not exceed {EMAIL_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::EmailAddress;

    #[test]
    fn email_is_lower_cased_and_trimmed() {
        let email = EmailAddress::new("  Someone@Example.COM ");
        assert_eq!(
            email.map(String::from).unwrap_or_default(),
            "someone@example.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("noatsign").is_err());
        assert!(EmailAddress::new("a@b@c.com").is_err());
        assert!(EmailAddress::new("user@nodot").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
    }
}
