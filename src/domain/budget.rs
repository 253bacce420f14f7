//! Budget derivation from an itinerary and the destination catalog

use crate::domain::itinerary::find_destination;
use crate::domain::{Destination, ItineraryItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of a destination's base cost added for activities
pub const ACTIVITIES_RATE: f64 = 0.10;

/// Share of a destination's base cost added for other expenses
pub const OTHER_RATE: f64 = 0.05;

/// Category share (percent) at which spending is flagged as elevated
pub const ELEVATED_PERCENT: f64 = 30.0;

/// Category share (percent) at which spending is flagged as critical
pub const CRITICAL_PERCENT: f64 = 40.0;

/// Cost categories of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Food,
    Accommodation,
    Transportation,
    Activities,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 5] = [
        BudgetCategory::Food,
        BudgetCategory::Accommodation,
        BudgetCategory::Transportation,
        BudgetCategory::Activities,
        BudgetCategory::Other,
    ];

    /// Vietnamese display label
    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Food => "ăn uống",
            BudgetCategory::Accommodation => "lưu trú",
            BudgetCategory::Transportation => "di chuyển",
            BudgetCategory::Activities => "hoạt động",
            BudgetCategory::Other => "chi phí khác",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-category cost breakdown. Amounts are never rounded here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub food: f64,
    pub accommodation: f64,
    pub transportation: f64,
    pub activities: f64,
    pub other: f64,
}

impl Budget {
    pub fn get(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Food => self.food,
            BudgetCategory::Accommodation => self.accommodation,
            BudgetCategory::Transportation => self.transportation,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Other => self.other,
        }
    }

    /// Categories with their amounts, in display order
    pub fn entries(&self) -> impl Iterator<Item = (BudgetCategory, f64)> + '_ {
        BudgetCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn total(&self) -> f64 {
        self.entries().map(|(_, amount)| amount).sum()
    }

    /// Category share of the total spend, rounded to a whole percent
    pub fn share_percent(&self, category: BudgetCategory) -> u32 {
        let total = self.total();
        if total <= 0.0 {
            return 0;
        }
        (self.get(category) / total * 100.0).round() as u32
    }

    /// Largest category; the earliest wins a tie and an all-zero budget has none
    pub fn highest_category(&self) -> Option<(BudgetCategory, f64)> {
        self.entries().fold(None, |best, (category, amount)| match best {
            Some((_, top)) if amount <= top => best,
            _ if amount > 0.0 => Some((category, amount)),
            _ => best,
        })
    }

    fn accumulate(&mut self, destination: &Destination) {
        let base = destination.base_cost();
        self.food += destination.food_cost;
        self.accommodation += destination.accommodation_cost;
        self.transportation += destination.transportation_cost;
        self.activities += base * ACTIVITIES_RATE;
        self.other += base * OTHER_RATE;
    }
}

/// Derive the budget of an itinerary.
///
/// Items whose destination is not in `destinations` are skipped. The result
/// depends only on the inputs.
pub fn calculate_budget(items: &[ItineraryItem], destinations: &[Destination]) -> Budget {
    let mut budget = Budget::default();
    for item in items {
        if let Some(destination) = find_destination(destinations, &item.destination_id) {
            budget.accumulate(destination);
        }
    }
    budget
}

/// Warning level of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Normal,
    Elevated,
    Critical,
}

impl BudgetStatus {
    fn from_percent(percent: f64) -> Self {
        if percent >= CRITICAL_PERCENT {
            BudgetStatus::Critical
        } else if percent >= ELEVATED_PERCENT {
            BudgetStatus::Elevated
        } else {
            BudgetStatus::Normal
        }
    }
}

/// Classify a category against the limit, or against total spend when no limit is set
pub fn classify(budget: &Budget, category: BudgetCategory, limit: f64) -> BudgetStatus {
    if limit > 0.0 {
        BudgetStatus::from_percent(budget.get(category) / limit * 100.0)
    } else {
        BudgetStatus::from_percent(f64::from(budget.share_percent(category)))
    }
}

/// Headline figures for a budget against its limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub total: f64,
    pub limit: f64,
    pub over_budget: bool,
    /// Amount spent beyond the limit, zero when within it
    pub overspend: f64,
    /// Share of the limit used, rounded and capped at 100; zero without a limit
    pub limit_usage_percent: u32,
    pub highest: Option<(BudgetCategory, f64)>,
}

impl BudgetSummary {
    pub fn new(budget: &Budget, limit: f64) -> Self {
        let total = budget.total();
        let over_budget = limit > 0.0 && total > limit;
        let limit_usage_percent = if limit > 0.0 {
            ((total / limit * 100.0).round() as u32).min(100)
        } else {
            0
        };
        BudgetSummary {
            total,
            limit,
            over_budget,
            overspend: if over_budget { total - limit } else { 0.0 },
            limit_usage_percent,
            highest: budget.highest_category(),
        }
    }
}

/// Cost of one scheduled visit
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationCost {
    pub destination_id: String,
    pub name: String,
    pub location: String,
    pub day: u32,
    pub order: u32,
    pub food: f64,
    pub accommodation: f64,
    pub transportation: f64,
    pub activities: f64,
    pub other: f64,
    pub total: f64,
}

/// Per-visit costs sorted by (day, order); visits of missing destinations are skipped
pub fn cost_breakdown(items: &[ItineraryItem], destinations: &[Destination]) -> Vec<DestinationCost> {
    let mut rows: Vec<DestinationCost> = items
        .iter()
        .filter_map(|item| {
            let dest = find_destination(destinations, &item.destination_id)?;
            let base = dest.base_cost();
            let activities = base * ACTIVITIES_RATE;
            let other = base * OTHER_RATE;
            Some(DestinationCost {
                destination_id: dest.id.clone(),
                name: dest.name.clone(),
                location: dest.location.clone(),
                day: item.day,
                order: item.order,
                food: dest.food_cost,
                accommodation: dest.accommodation_cost,
                transportation: dest.transportation_cost,
                activities,
                other,
                total: base + activities + other,
            })
        })
        .collect();
    rows.sort_by_key(|row| (row.day, row.order));
    rows
}

/// Persisted budget: limit plus a snapshot of the categories, tied to one itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: String,
    pub itinerary_id: String,
    #[serde(default)]
    pub budget_limit: f64,
    #[serde(default)]
    pub categories: Budget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a budget record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    pub itinerary_id: String,
    pub budget_limit: f64,
    pub categories: Budget,
}
