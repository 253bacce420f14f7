//! Store traits for the three persisted collections

use crate::domain::{
    BudgetDraft, BudgetRecord, Destination, DestinationDraft, Itinerary, ItineraryDraft,
};
use crate::error::Result;
use async_trait::async_trait;

/// Destination collection
#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn list_destinations(&self) -> Result<Vec<Destination>>;
    async fn get_destination(&self, id: &str) -> Result<Destination>;
    async fn create_destination(&self, draft: &DestinationDraft) -> Result<Destination>;
    async fn update_destination(&self, id: &str, draft: &DestinationDraft) -> Result<Destination>;
    async fn delete_destination(&self, id: &str) -> Result<()>;
}

/// Itinerary collection
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>>;
    async fn get_itinerary(&self, id: &str) -> Result<Itinerary>;
    async fn create_itinerary(&self, draft: &ItineraryDraft) -> Result<Itinerary>;
    async fn update_itinerary(&self, id: &str, draft: &ItineraryDraft) -> Result<Itinerary>;
    async fn delete_itinerary(&self, id: &str) -> Result<()>;
}

/// Budget collection
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// List budgets, narrowed by the store to `itinerary_id` when given
    async fn list_budgets(&self, itinerary_id: Option<&str>) -> Result<Vec<BudgetRecord>>;
    async fn create_budget(&self, draft: &BudgetDraft) -> Result<BudgetRecord>;
    async fn update_budget(&self, id: &str, draft: &BudgetDraft) -> Result<BudgetRecord>;
    async fn delete_budget(&self, id: &str) -> Result<()>;
}

/// The budget of an itinerary, if one was saved.
///
/// The store's own filtering is not trusted to be exact, so the result is
/// matched again on `itinerary_id` and the first match wins.
pub async fn find_budget_for_itinerary(
    store: &dyn BudgetStore,
    itinerary_id: &str,
) -> Result<Option<BudgetRecord>> {
    let budgets = store.list_budgets(Some(itinerary_id)).await?;
    Ok(budgets
        .into_iter()
        .find(|budget| budget.itinerary_id == itinerary_id))
}
