use tracing::info;

use crate::ui::{ModalKind, ModalSet};
use crate::utils::{is_valid_email, SiteError, SiteResult};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Which email capture form was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureForm {
    /// Inline email fields and the call-to-action block
    Contact,
    /// "Try free" buttons
    TryFree,
}

/// Email capture: validate the trimmed address and acknowledge it
pub fn submit_email(form: CaptureForm, email: &str) -> SiteResult<String> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(SiteError::InvalidEmail);
    }

    info!("Email submitted via {:?}: {}", form, email);
    Ok(match form {
        CaptureForm::Contact => "Thank you! We will contact you shortly.".to_string(),
        CaptureForm::TryFree => format!(
            "Thank you! You got 5 days of free access. We sent a confirmation to {}",
            email
        ),
    })
}

/// Login form: a valid email and any non-empty password
pub fn login(email: &str, password: &str, modals: &mut ModalSet) -> SiteResult<String> {
    let email = email.trim();
    if !is_valid_email(email) || password.is_empty() {
        return Err(SiteError::IncompleteCredentials);
    }

    info!("Login submitted: {}", email);
    modals.close(ModalKind::Login);
    Ok("Signed in successfully! Welcome to TradeBlade.".to_string())
}

/// Register form; checks run in order and the first failure is reported
pub fn register(email: &str, password: &str, confirm: &str, modals: &mut ModalSet) -> SiteResult<String> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(SiteError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SiteError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    if password != confirm {
        return Err(SiteError::PasswordMismatch);
    }

    info!("Register submitted: {}", email);
    modals.close(ModalKind::Register);
    Ok("Registration complete! Welcome to TradeBlade.".to_string())
}
