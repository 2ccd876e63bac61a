//! Closed error taxonomy for the identity provider.
//!
//! The provider reports failures as string codes. Every code we know about
//! maps to a variant here; anything else funnels to [`ProviderError::Unknown`]
//! so the rest of the app never branches on raw strings. The `Display` text
//! is what the user sees.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("Email already registered")]
    EmailInUse,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Sign-in cancelled")]
    PopupClosed,
    #[error("Popup blocked. Please allow popups for this site.")]
    PopupBlocked,
    #[error("Account exists with different sign-in method")]
    AccountConflict,
    /// Carries the raw provider code for logging; the displayed message is
    /// deliberately generic.
    #[error("Something went wrong. Please try again.")]
    Unknown(String),
}

impl ProviderError {
    /// Map a provider code to a variant. REST codes sometimes carry a
    /// trailing reason ("WEAK_PASSWORD : Password should be ..."); only the
    /// leading token is significant.
    pub fn from_code(raw: &str) -> Self {
        let code = raw.split_whitespace().next().unwrap_or(raw);
        match code {
            "INVALID_EMAIL" | "MISSING_EMAIL" => ProviderError::InvalidEmail,
            "WEAK_PASSWORD" | "MISSING_PASSWORD" => ProviderError::WeakPassword,
            "EMAIL_EXISTS" => ProviderError::EmailInUse,
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND"
            | "USER_DISABLED" => ProviderError::InvalidCredentials,
            "auth/popup-closed-by-user" => ProviderError::PopupClosed,
            "auth/popup-blocked" => ProviderError::PopupBlocked,
            "auth/account-exists-with-different-credential"
            | "FEDERATED_USER_ID_ALREADY_LINKED" => ProviderError::AccountConflict,
            _ => ProviderError::Unknown(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_closed_variants() {
        assert_eq!(
            ProviderError::from_code("EMAIL_EXISTS"),
            ProviderError::EmailInUse
        );
        assert_eq!(
            ProviderError::from_code("INVALID_EMAIL"),
            ProviderError::InvalidEmail
        );
        assert_eq!(
            ProviderError::from_code("INVALID_LOGIN_CREDENTIALS"),
            ProviderError::InvalidCredentials
        );
        assert_eq!(
            ProviderError::from_code("auth/popup-blocked"),
            ProviderError::PopupBlocked
        );
        assert_eq!(
            ProviderError::from_code("auth/account-exists-with-different-credential"),
            ProviderError::AccountConflict
        );
    }

    #[test]
    fn trailing_reason_is_ignored() {
        assert_eq!(
            ProviderError::from_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            ProviderError::WeakPassword
        );
    }

    #[test]
    fn unknown_codes_funnel_to_generic_variant() {
        let err = ProviderError::from_code("TOO_MANY_ATTEMPTS_TRY_LATER");
        assert_eq!(
            err,
            ProviderError::Unknown("TOO_MANY_ATTEMPTS_TRY_LATER".to_string())
        );
        assert_eq!(err.to_string(), "Something went wrong. Please try again.");
    }

    #[test]
    fn used_email_surfaces_as_already_registered() {
        assert_eq!(
            ProviderError::from_code("EMAIL_EXISTS").to_string(),
            "Email already registered"
        );
    }
}
