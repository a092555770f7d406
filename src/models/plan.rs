//! Tariff plans and the static price table

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::utils::SiteError;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Standart,
    Vip,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Standart, Plan::Vip];

    pub fn id(&self) -> &'static str {
        match self {
            Plan::Standart => "standart",
            Plan::Vip => "vip",
        }
    }

    /// Name as shown in the purchase summary
    pub fn display_name(&self) -> String {
        self.id().to_uppercase()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Plan {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standart" => Ok(Plan::Standart),
            "vip" => Ok(Plan::Vip),
            _ => Err(SiteError::UnknownPlan(s.to_string())),
        }
    }
}

/// Parse a billing period given in months
pub fn parse_period(s: &str) -> Result<u32, SiteError> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|months| *months > 0)
        .ok_or_else(|| SiteError::InvalidPeriod(s.to_string()))
}

/// Immutable (plan, months) -> price lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: HashMap<Plan, BTreeMap<u32, u32>>,
}

impl PriceTable {
    pub fn lookup(&self, plan: Plan, months: u32) -> Option<u32> {
        self.prices.get(&plan)?.get(&months).copied()
    }

    /// Billing periods offered for a plan, shortest first
    pub fn periods(&self, plan: Plan) -> Vec<u32> {
        self.prices
            .get(&plan)
            .map(|periods| periods.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn plans(&self) -> Vec<Plan> {
        Plan::ALL
            .into_iter()
            .filter(|plan| self.prices.get(plan).is_some_and(|p| !p.is_empty()))
            .collect()
    }

    /// Parse a table such as `{"vip": {"1": 75, "12": 585}}`
    pub fn from_json_str(json: &str) -> Result<Self, SiteError> {
        let table: PriceTable = serde_json::from_str(json)
            .map_err(|e| SiteError::Config(format!("Invalid price table: {}", e)))?;

        if table.plans().is_empty() {
            return Err(SiteError::Config("Price table has no prices".to_string()));
        }
        if table.prices.values().flat_map(|p| p.keys()).any(|months| *months == 0) {
            return Err(SiteError::Config("Price table contains a 0-month period".to_string()));
        }

        Ok(table)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        let standart = BTreeMap::from([(12, 234), (6, 150), (3, 90), (1, 35)]);
        let vip = BTreeMap::from([(12, 585), (6, 350), (3, 200), (1, 75)]);

        PriceTable {
            prices: HashMap::from([(Plan::Standart, standart), (Plan::Vip, vip)]),
        }
    }
}
