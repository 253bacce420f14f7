//! Trip planner state: destination snapshot, itinerary plan, derived budget

use crate::domain::{
    calculate_budget, classify, cost_breakdown, Budget, BudgetCategory, BudgetRecord,
    BudgetStatus, BudgetSummary, Destination, DestinationCost, Itinerary, ItineraryPlan,
};
use crate::domain::itinerary::trip_day_count;
use crate::error::{DulichError, Result};
use crate::infrastructure::DestinationStore;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Name and dates of the trip being planned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TripDetails {
    pub fn day_count(&self) -> u32 {
        trip_day_count(self.start_date, self.end_date)
    }
}

/// Identifies one destination fetch; later tickets supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Owns the planning state.
///
/// Every itinerary change swaps in a new `ItineraryPlan` snapshot and then
/// recomputes the budget, so the budget always reflects the committed plan.
#[derive(Debug, Clone, Default)]
pub struct TripPlanner {
    destinations: Vec<Destination>,
    plan: ItineraryPlan,
    budget: Budget,
    details: Option<TripDetails>,
    itinerary_id: Option<String>,
    budget_id: Option<String>,
    issued: u64,
    applied: u64,
}

impl TripPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn plan(&self) -> &ItineraryPlan {
        &self.plan
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn budget_limit(&self) -> f64 {
        self.plan.budget_limit()
    }

    pub fn details(&self) -> Option<&TripDetails> {
        self.details.as_ref()
    }

    pub fn itinerary_id(&self) -> Option<&str> {
        self.itinerary_id.as_deref()
    }

    pub fn budget_id(&self) -> Option<&str> {
        self.budget_id.as_deref()
    }

    /// Start a destination fetch
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Apply a fetch result unless a newer fetch has already been applied.
    ///
    /// Returns whether the list was applied.
    pub fn apply_destinations(&mut self, ticket: FetchTicket, destinations: Vec<Destination>) -> bool {
        if ticket.0 <= self.applied {
            warn!(
                "Discarding destination list from fetch {} (fetch {} already applied)",
                ticket.0, self.applied
            );
            return false;
        }
        self.applied = ticket.0;
        self.destinations = destinations;
        self.recompute_budget();
        true
    }

    /// Replace the destination snapshot with the store's current list
    pub async fn refresh_destinations(&mut self, store: &dyn DestinationStore) -> Result<()> {
        let ticket = self.begin_fetch();
        let destinations = store.list_destinations().await?;
        self.apply_destinations(ticket, destinations);
        Ok(())
    }

    /// Set or change the trip name and dates
    pub fn set_details(&mut self, details: TripDetails) -> Result<()> {
        if details.name.trim().is_empty() {
            return Err(DulichError::Validation("trip name is required".to_string()));
        }
        if details.end_date < details.start_date {
            return Err(DulichError::Validation(format!(
                "end date {} is before start date {}",
                details.end_date, details.start_date
            )));
        }
        let days = details.day_count();
        if let Some(day) = self.plan.days().into_iter().find(|day| *day > days) {
            return Err(DulichError::DayOutOfRange { day, days });
        }
        self.details = Some(details);
        Ok(())
    }

    /// Schedule a destination at `order` on `day`
    pub fn add_destination(&mut self, destination_id: &str, day: u32, order: u32) -> Result<()> {
        self.check_day(day)?;
        let next = self
            .plan
            .add_item(destination_id, day, order, &self.destinations)?;
        self.commit(next);
        info!("Added {} to day {}", destination_id, day);
        Ok(())
    }

    /// Schedule a destination as the last stop of `day`
    pub fn append_destination(&mut self, destination_id: &str, day: u32) -> Result<()> {
        let order = self.plan.day_items(day).len() as u32 + 1;
        self.add_destination(destination_id, day, order)
    }

    /// Unschedule the first visit of a destination on `day`; absent visits are ignored
    pub fn remove_destination(&mut self, destination_id: &str, day: u32) {
        let next = self.plan.remove_item(destination_id, day);
        self.commit(next);
        info!("Removed {} from day {}", destination_id, day);
    }

    /// Move a visit; see [`ItineraryPlan::reorder`]
    pub fn reorder(
        &mut self,
        source_day: u32,
        source_order: u32,
        destination_day: u32,
        destination_index: usize,
    ) -> Result<()> {
        self.check_day(destination_day)?;
        let next = self.plan.reorder(
            source_day,
            source_order,
            destination_day,
            destination_index,
            &self.destinations,
        )?;
        self.commit(next);
        Ok(())
    }

    /// Store the budget limit; the budget itself is unchanged
    pub fn set_budget_limit(&mut self, limit: f64) -> Result<()> {
        self.plan = self.plan.with_budget_limit(limit)?;
        Ok(())
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary::new(&self.budget, self.budget_limit())
    }

    pub fn status(&self, category: BudgetCategory) -> BudgetStatus {
        classify(&self.budget, category, self.budget_limit())
    }

    pub fn cost_breakdown(&self) -> Vec<DestinationCost> {
        cost_breakdown(self.plan.items(), &self.destinations)
    }

    /// Replace the plan with a stored itinerary and its budget record
    pub fn load(&mut self, itinerary: &Itinerary, budget: Option<&BudgetRecord>) -> Result<()> {
        let limit = budget.map_or(0.0, |record| record.budget_limit);
        self.plan = ItineraryPlan::from_items(itinerary.destinations.clone()).with_budget_limit(limit)?;
        self.details = Some(TripDetails {
            name: itinerary.name.clone(),
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
        });
        self.itinerary_id = Some(itinerary.id.clone());
        self.budget_id = budget.map(|record| record.id.clone());
        self.recompute_budget();
        Ok(())
    }

    /// Drop both saved identifiers, keeping the plan itself
    pub fn forget_saved(&mut self) {
        self.itinerary_id = None;
        self.budget_id = None;
    }

    pub(crate) fn set_itinerary_id(&mut self, id: String) {
        self.itinerary_id = Some(id);
    }

    pub(crate) fn set_budget_id(&mut self, id: String) {
        self.budget_id = Some(id);
    }

    fn check_day(&self, day: u32) -> Result<()> {
        match &self.details {
            Some(details) if day > details.day_count() => Err(DulichError::DayOutOfRange {
                day,
                days: details.day_count(),
            }),
            _ => Ok(()),
        }
    }

    fn commit(&mut self, plan: ItineraryPlan) {
        self.plan = plan;
        self.recompute_budget();
    }

    fn recompute_budget(&mut self) {
        self.budget = calculate_budget(self.plan.items(), &self.destinations);
    }
}
