use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::{Plan, PriceTable};
use crate::ui::{ModalKind, ModalSet};
use crate::utils::{format_usd, is_valid_email, SiteError, SiteResult};

/// Period a tariff card shows before the visitor picks one
pub const DEFAULT_PERIOD_MONTHS: u32 = 12;

/// One plan card in the tariffs section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffCard {
    pub plan: Plan,
    pub period: u32,
    pub price_text: String,
    /// `data-price` of the card's buy button
    pub button_price: u32,
}

/// Contents of the purchase summary modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryView {
    /// `data-plan` of the modal
    pub plan: Option<Plan>,
    /// `data-base-price` of the modal
    pub base_price: Option<u32>,
    pub plan_name: String,
    pub unit_price_text: String,
    pub total_price_text: String,
    pub period: Option<u32>,
}

/// A confirmed purchase, as logged on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub email: String,
    pub plan: Plan,
    pub period: Option<u32>,
    pub price_text: String,
}

impl PurchaseReceipt {
    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you! Your {} subscription is confirmed. We sent a confirmation to {}",
            self.plan.display_name(),
            self.email
        )
    }
}

/// Tariff cards plus the purchase summary, priced from one table
pub struct Calculator {
    table: PriceTable,
    cards: BTreeMap<Plan, TariffCard>,
    summary: SummaryView,
}

impl Calculator {
    pub fn new(table: PriceTable) -> Self {
        let cards = table
            .plans()
            .into_iter()
            .filter_map(|plan| {
                let period = Self::initial_period(&table, plan)?;
                let price = table.lookup(plan, period)?;
                Some((
                    plan,
                    TariffCard {
                        plan,
                        period,
                        price_text: format_usd(price),
                        button_price: price,
                    },
                ))
            })
            .collect();

        Self {
            table,
            cards,
            summary: SummaryView::default(),
        }
    }

    fn initial_period(table: &PriceTable, plan: Plan) -> Option<u32> {
        let periods = table.periods(plan);
        if periods.contains(&DEFAULT_PERIOD_MONTHS) {
            Some(DEFAULT_PERIOD_MONTHS)
        } else {
            periods.last().copied()
        }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn card(&self, plan: Plan) -> Option<&TariffCard> {
        self.cards.get(&plan)
    }

    pub fn cards(&self) -> impl Iterator<Item = &TariffCard> {
        self.cards.values()
    }

    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    /// Buy button on a plan card: seed the summary from the card and open it
    pub fn select_plan(&mut self, plan: Plan, modals: &mut ModalSet) -> SiteResult<()> {
        let card = self
            .cards
            .get(&plan)
            .ok_or_else(|| SiteError::UnknownPlan(plan.to_string()))?;

        let price_text = format_usd(card.button_price);
        self.summary = SummaryView {
            plan: Some(plan),
            base_price: Some(card.button_price),
            plan_name: plan.display_name(),
            unit_price_text: price_text.clone(),
            total_price_text: price_text,
            period: Some(card.period),
        };

        info!("Plan {} selected at {}", plan, self.summary.total_price_text);
        modals.open(ModalKind::Purchase);
        Ok(())
    }

    /// Period select on a plan card; returns whether the card changed
    ///
    /// A (plan, period) pair missing from the table leaves the card as it was.
    pub fn change_card_period(&mut self, plan: Plan, months: u32) -> bool {
        let Some(price) = self.table.lookup(plan, months) else {
            debug!("No price for {} / {} months, card unchanged", plan, months);
            return false;
        };
        let Some(card) = self.cards.get_mut(&plan) else {
            return false;
        };

        card.period = months;
        card.price_text = format_usd(price);
        card.button_price = price;
        true
    }

    /// Period select inside the summary; unit and total change together
    pub fn change_summary_period(&mut self, months: u32) -> bool {
        let Some(plan) = self.summary.plan else {
            debug!("Summary period changed with no plan selected");
            return false;
        };
        let Some(price) = self.table.lookup(plan, months) else {
            debug!("No price for {} / {} months, summary unchanged", plan, months);
            return false;
        };

        let price_text = format_usd(price);
        self.summary.period = Some(months);
        self.summary.unit_price_text = price_text.clone();
        self.summary.total_price_text = price_text;
        true
    }

    fn reset_summary_period(&mut self, plan: Plan) {
        let Some(period) = Self::initial_period(&self.table, plan) else {
            return;
        };
        if let Some(price) = self.table.lookup(plan, period) {
            let price_text = format_usd(price);
            self.summary.period = Some(period);
            self.summary.unit_price_text = price_text.clone();
            self.summary.total_price_text = price_text;
        }
    }

    /// Confirm the purchase
    ///
    /// On a bad email nothing changes and the summary stays open. The email is
    /// checked as typed. A confirmed purchase puts the summary's period select
    /// back to its default before closing.
    pub fn submit_purchase(&mut self, email: &str, modals: &mut ModalSet) -> SiteResult<PurchaseReceipt> {
        if !modals.is_open(ModalKind::Purchase) {
            return Err(SiteError::ModalNotOpen(ModalKind::Purchase));
        }
        let plan = self.summary.plan.ok_or(SiteError::NoPlanSelected)?;

        if !is_valid_email(email) {
            return Err(SiteError::InvalidEmail);
        }

        let receipt = PurchaseReceipt {
            email: email.to_string(),
            plan,
            period: self.summary.period,
            price_text: self.summary.total_price_text.clone(),
        };
        info!(
            "Purchase submitted: {} {} for {:?} months at {}",
            receipt.email, receipt.plan, receipt.period, receipt.price_text
        );

        self.reset_summary_period(plan);
        modals.close(ModalKind::Purchase);
        Ok(receipt)
    }
}
