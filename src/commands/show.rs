use crate::commands::SiteContext;
use crate::utils::{SiteResult, Table};

/// Render the page regions: `$show [deals|tariffs|summary|modals]`
pub fn execute(ctx: &SiteContext, args: &[&str]) -> SiteResult<String> {
    let section = args.first().map(|s| s.to_lowercase());
    let wants = |name: &str| section.as_deref().map_or(true, |s| s == name);

    let mut blocks = Vec::new();

    if wants("deals") {
        let mut table = Table::new(&["Pair", "24h", "Arrow", "Last", "High", "Low", "Updated"]).with_title("Deals");
        for card in ctx.board.snapshot() {
            let price = |v: Option<f64>| v.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                card.pair.clone(),
                card.profit_text.clone(),
                match (card.direction, card.profit_color) {
                    (Some(d), Some(color)) => format!("{} {}° {}", d.arrow(), card.arrow_rotation_deg, color),
                    _ => "-".to_string(),
                },
                price(card.last_price),
                price(card.high_24h),
                price(card.low_24h),
                match card.updated_at {
                    Some(t) if card.is_loaded() => t.format("%H:%M:%S").to_string(),
                    _ => "loading".to_string(),
                },
            ]);
        }
        blocks.push(table.render());
    }

    if wants("tariffs") {
        let mut table = Table::new(&["Plan", "Period", "Price", "Offered"]).with_title("Tariffs");
        for card in ctx.calculator.cards() {
            let offered: Vec<String> = ctx
                .calculator
                .table()
                .periods(card.plan)
                .iter()
                .map(|p| p.to_string())
                .collect();
            table.add_row(vec![
                card.plan.display_name(),
                format!("{} mo", card.period),
                card.price_text.clone(),
                offered.join("/"),
            ]);
        }
        blocks.push(table.render());
    }

    if wants("summary") {
        let summary = ctx.calculator.summary();
        let mut table = Table::new(&["Plan", "Period", "Price", "Total"]).with_title("Purchase summary");
        if summary.plan.is_some() {
            table.add_row(vec![
                summary.plan_name.clone(),
                summary.period.map(|p| format!("{} mo", p)).unwrap_or_default(),
                summary.unit_price_text.clone(),
                summary.total_price_text.clone(),
            ]);
        }
        blocks.push(table.render());
    }

    if wants("modals") {
        let open: Vec<String> = ctx.modals.open_modals().iter().map(|k| k.to_string()).collect();
        blocks.push(format!(
            "Open modals: {}{}",
            if open.is_empty() { "none".to_string() } else { open.join(", ") },
            if ctx.modals.scroll_locked() { " (scroll locked)" } else { "" }
        ));
    }

    Ok(blocks.join("\n\n"))
}
