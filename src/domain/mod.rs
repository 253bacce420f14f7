//! Domain layer - Business logic and domain models

pub mod budget;
pub mod destination;
pub mod filter;
pub mod itinerary;
pub mod statistics;

pub use budget::{
    calculate_budget, classify, cost_breakdown, Budget, BudgetCategory, BudgetDraft, BudgetRecord,
    BudgetStatus, BudgetSummary, DestinationCost,
};
pub use destination::{Destination, DestinationDraft, DestinationType};
pub use filter::{DestinationFilter, SortOrder};
pub use itinerary::{Itinerary, ItineraryDraft, ItineraryItem, ItineraryPlan};
pub use statistics::{destination_stats, monthly_plans, DestinationStats, MonthlyPlans};
