use crate::commands::SiteContext;
use crate::services::form_service::{self, CaptureForm};
use crate::ui::ModalKind;
use crate::utils::{SiteError, SiteResult};

pub fn subscribe(args: &[&str]) -> SiteResult<String> {
    form_service::submit_email(CaptureForm::Contact, args.first().copied().unwrap_or_default())
}

/// Try-free buttons outside an email field open registration instead
pub fn try_free(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    match args.first() {
        Some(email) => form_service::submit_email(CaptureForm::TryFree, email),
        None => {
            ctx.modals.open(ModalKind::Register);
            Ok(format!("Opened {}", ModalKind::Register))
        }
    }
}

pub fn login(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    if !ctx.modals.is_open(ModalKind::Login) {
        return Err(SiteError::ModalNotOpen(ModalKind::Login));
    }
    let email = args.first().copied().unwrap_or_default();
    let password = args.get(1).copied().unwrap_or_default();
    form_service::login(email, password, &mut ctx.modals)
}

pub fn register(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    if !ctx.modals.is_open(ModalKind::Register) {
        return Err(SiteError::ModalNotOpen(ModalKind::Register));
    }
    let email = args.first().copied().unwrap_or_default();
    let password = args.get(1).copied().unwrap_or_default();
    let confirm = args.get(2).copied().unwrap_or_default();
    form_service::register(email, password, confirm, &mut ctx.modals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::PriceTable;
    use crate::services::pricing_service::Calculator;
    use crate::ui::DealBoard;

    fn context() -> SiteContext {
        SiteContext::new(
            Arc::new(DealBoard::new(&["BTCUSDT"])),
            Calculator::new(PriceTable::default()),
        )
    }

    #[test]
    fn try_free_without_email_opens_register() {
        let mut ctx = context();
        try_free(&mut ctx, &[]).expect("open");
        assert!(ctx.modals.is_open(ModalKind::Register));
    }

    #[test]
    fn forms_need_their_modal() {
        let mut ctx = context();
        assert!(matches!(
            login(&mut ctx, &["a@b.co", "pw"]),
            Err(SiteError::ModalNotOpen(ModalKind::Login))
        ));

        ctx.modals.open(ModalKind::Register);
        assert!(matches!(
            register(&mut ctx, &["a@b.co", "secret1", "secret2"]),
            Err(SiteError::PasswordMismatch)
        ));
        register(&mut ctx, &["a@b.co", "secret1", "secret1"]).expect("register");
        assert!(!ctx.modals.is_open(ModalKind::Register));
    }

    #[test]
    fn subscribe_requires_address() {
        assert!(matches!(subscribe(&[]), Err(SiteError::InvalidEmail)));
        assert!(subscribe(&["lead@example.org"]).is_ok());
    }
}
