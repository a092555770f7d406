use tracing::info;

use crate::commands::SiteContext;
use crate::models::{parse_period, Plan};
use crate::utils::{SiteError, SiteResult};

pub fn select_plan(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let plan: Plan = args.first().ok_or(SiteError::Usage("$plan <standart|vip>"))?.parse()?;

    ctx.calculator.select_plan(plan, &mut ctx.modals)?;
    let summary = ctx.calculator.summary();
    Ok(format!(
        "{} | {} months | {}",
        summary.plan_name,
        summary.period.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
        summary.total_price_text
    ))
}

pub fn card_period(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let usage = "$period <standart|vip> <months>";
    let plan: Plan = args.first().ok_or(SiteError::Usage(usage))?.parse()?;
    let months = parse_period(args.get(1).ok_or(SiteError::Usage(usage))?)?;

    ctx.calculator.change_card_period(plan, months);
    let card = ctx
        .calculator
        .card(plan)
        .ok_or_else(|| SiteError::UnknownPlan(plan.to_string()))?;
    Ok(format!("{}: {}", plan.display_name(), card.price_text))
}

pub fn summary_period(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let months = parse_period(args.first().ok_or(SiteError::Usage("$summary_period <months>"))?)?;

    ctx.calculator.change_summary_period(months);
    let summary = ctx.calculator.summary();
    Ok(format!(
        "Price: {} | Total: {}",
        summary.unit_price_text, summary.total_price_text
    ))
}

pub fn purchase(ctx: &mut SiteContext, args: &[&str]) -> SiteResult<String> {
    let email = args.first().copied().unwrap_or_default();
    let receipt = ctx.calculator.submit_purchase(email, &mut ctx.modals)?;
    info!("Purchase acknowledged for {}", receipt.email);
    Ok(receipt.acknowledgement())
}
