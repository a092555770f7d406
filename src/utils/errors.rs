use thiserror::Error;

use crate::api::binance::ApiError;
use crate::ui::modal::ModalKind;

/// Errors surfaced by site handlers
///
/// Validation variants carry the exact text shown to the visitor; they abort
/// the triggering action without touching any state.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must contain at least {min} characters.")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please fill in all fields correctly.")]
    IncompleteCredentials,
    #[error("Unknown plan: '{0}'. Available plans: standart, vip")]
    UnknownPlan(String),
    #[error("Invalid billing period: '{0}'. Use a number of months")]
    InvalidPeriod(String),
    #[error("Unknown modal: '{0}'. Available: menu, login, register, purchase")]
    UnknownModal(String),
    #[error("The {0} window is not open")]
    ModalNotOpen(ModalKind),
    #[error("No plan selected")]
    NoPlanSelected,
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Price feed error: {0}")]
    Feed(#[from] ApiError),
}

impl SiteError {
    /// Whether the failure comes from visitor input rather than the runtime
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SiteError::InvalidEmail
                | SiteError::PasswordTooShort { .. }
                | SiteError::PasswordMismatch
                | SiteError::IncompleteCredentials
        )
    }
}

pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            SiteError::PasswordTooShort { min: 6 }.to_string(),
            "Password must contain at least 6 characters."
        );
        assert!(SiteError::InvalidEmail.is_validation());
        assert!(!SiteError::NoPlanSelected.is_validation());
    }

    #[test]
    fn feed_errors_convert() {
        let err: SiteError = ApiError::NotFound("missing".to_string()).into();
        assert!(err.to_string().starts_with("Price feed error:"));
    }
}
