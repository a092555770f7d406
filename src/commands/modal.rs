use crate::commands::SiteContext;
use crate::ui::modal::Closed;
use crate::ui::{ClickTarget, ModalKind};
use crate::utils::{SiteError, SiteResult};

fn parse_kind(args: &[&str], usage: &'static str) -> SiteResult<ModalKind> {
    args.first().ok_or(SiteError::Usage(usage))?.parse()
}

fn describe(closed: &[Closed]) -> String {
    if closed.is_empty() {
        return "Nothing to close".to_string();
    }
    closed
        .iter()
        .map(|c| {
            if c.form_reset {
                format!("Closed {} (form cleared)", c.kind)
            } else {
                format!("Closed {}", c.kind)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn open(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let kind = parse_kind(args, "$open <menu|login|register>")?;
    if kind == ModalKind::Purchase {
        // the summary only opens through a plan's buy button
        return Err(SiteError::Usage("$plan <standart|vip>"));
    }
    ctx.modals.open(kind);
    Ok(format!("Opened {}", kind))
}

pub fn close(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let kind = parse_kind(args, "$close <modal>")?;
    let closed: Vec<Closed> = ctx.modals.close(kind).into_iter().collect();
    Ok(describe(&closed))
}

pub fn click(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let usage = "$click <modal> backdrop|content";
    let kind = parse_kind(args, usage)?;
    let target: ClickTarget = args.get(1).ok_or(SiteError::Usage(usage))?.parse()?;

    if !ctx.modals.is_open(kind) {
        return Err(SiteError::ModalNotOpen(kind));
    }
    match ctx.modals.click(kind, target) {
        Some(closed) => Ok(describe(&[closed])),
        None => Ok(format!("{} stays open", kind)),
    }
}

pub fn key(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    match args.first() {
        Some(k) if k.eq_ignore_ascii_case("escape") || k.eq_ignore_ascii_case("esc") => {
            Ok(describe(&ctx.modals.escape()))
        }
        Some(_) => Ok(String::new()),
        None => Err(SiteError::Usage("$key <name>")),
    }
}

pub fn switch(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let usage = "$switch login|register";
    let kind = parse_kind(args, usage)?;
    if !matches!(kind, ModalKind::Login | ModalKind::Register) {
        return Err(SiteError::Usage(usage));
    }

    let closed = ctx.modals.switch_to(kind);
    let mut output = describe(&closed);
    output.push_str(&format!("\nOpened {}", kind));
    Ok(output)
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
    fn open_then_escape() {
        let mut ctx = context();
        assert_eq!(open(&mut ctx, &["login"]).expect("open"), "Opened login");
        assert!(ctx.modals.scroll_locked());

        let out = key(&mut ctx, &["Escape"]).expect("key");
        assert_eq!(out, "Closed login (form cleared)");
        assert!(!ctx.modals.scroll_locked());
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut ctx = context();
        open(&mut ctx, &["menu"]).expect("open");
        assert_eq!(key(&mut ctx, &["Enter"]).expect("key"), "");
        assert!(ctx.modals.is_open(ModalKind::MobileMenu));
    }

    #[test]
    fn backdrop_click_closes_content_click_does_not() {
        let mut ctx = context();
        open(&mut ctx, &["register"]).expect("open");

        assert_eq!(click(&mut ctx, &["register", "content"]).expect("click"), "register stays open");
        assert!(ctx.modals.is_open(ModalKind::Register));

        click(&mut ctx, &["register", "backdrop"]).expect("click");
        assert!(!ctx.modals.is_open(ModalKind::Register));

        assert!(matches!(
            click(&mut ctx, &["register", "backdrop"]),
            Err(SiteError::ModalNotOpen(ModalKind::Register))
        ));
    }

    #[test]
    fn purchase_cannot_be_opened_directly() {
        let mut ctx = context();
        assert!(open(&mut ctx, &["purchase"]).is_err());
        assert!(!ctx.modals.is_open(ModalKind::Purchase));
    }

    #[test]
    fn switch_only_between_forms() {
        let mut ctx = context();
        open(&mut ctx, &["login"]).expect("open");
        let out = switch(&mut ctx, &["register"]).expect("switch");
        assert!(out.ends_with("Opened register"));
        assert!(switch(&mut ctx, &["menu"]).is_err());
        assert!(close(&mut ctx, &["nowhere"]).is_err());
    }
}
