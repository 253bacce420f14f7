//! Save, load and delete trips.
//!
//! An itinerary and its budget record live in two collections with no
//! transaction spanning them. Saving is therefore two steps: the itinerary
//! first, then the budget. If the second step fails the itinerary stays
//! saved and the outcome reports the budget as pending; `save_budget` can
//! be called again later to finish. Nothing is retried automatically.

use crate::application::planner::TripPlanner;
use crate::domain::{BudgetDraft, Itinerary, ItineraryDraft};
use crate::error::{DulichError, Result};
use crate::infrastructure::{find_budget_for_itinerary, BudgetStore, ItineraryStore, Stores};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a two-step save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Itinerary and budget are both stored
    Complete {
        itinerary_id: String,
        budget_id: String,
    },
    /// Itinerary stored; the budget write failed and has not been applied
    BudgetPending { itinerary_id: String, reason: String },
}

impl SaveOutcome {
    pub fn itinerary_id(&self) -> &str {
        match self {
            SaveOutcome::Complete { itinerary_id, .. }
            | SaveOutcome::BudgetPending { itinerary_id, .. } => itinerary_id,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SaveOutcome::Complete { .. })
    }
}

/// Service persisting trips planned in a [`TripPlanner`]
pub struct TripService {
    itineraries: Arc<dyn ItineraryStore>,
    budgets: Arc<dyn BudgetStore>,
}

impl TripService {
    pub fn new(stores: &Stores) -> Self {
        TripService {
            itineraries: stores.itineraries.clone(),
            budgets: stores.budgets.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Itinerary>> {
        self.itineraries.list_itineraries().await
    }

    /// Save the itinerary, then its budget.
    ///
    /// Fails without side effects on the budget if the itinerary write fails.
    pub async fn save(&self, planner: &mut TripPlanner) -> Result<SaveOutcome> {
        let details = planner.details().ok_or_else(|| {
            DulichError::Validation("trip name and dates are required".to_string())
        })?;
        let draft = ItineraryDraft {
            name: details.name.clone(),
            start_date: details.start_date,
            end_date: details.end_date,
            destinations: planner.plan().items().to_vec(),
        };
        draft.validate()?;

        let saved = match planner.itinerary_id() {
            Some(id) => self.itineraries.update_itinerary(id, &draft).await,
            None => self.itineraries.create_itinerary(&draft).await,
        }
        .inspect_err(|e| warn!("Saving itinerary failed: {}", e))?;
        planner.set_itinerary_id(saved.id.clone());
        info!("Saved itinerary {}", saved.id);

        match self.save_budget(planner).await {
            Ok(budget_id) => Ok(SaveOutcome::Complete {
                itinerary_id: saved.id,
                budget_id,
            }),
            Err(e) => {
                warn!("Itinerary {} saved but its budget is pending: {}", saved.id, e);
                Ok(SaveOutcome::BudgetPending {
                    itinerary_id: saved.id,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Save the budget of the current itinerary, creating the record if none exists.
    ///
    /// Returns the budget record identifier.
    pub async fn save_budget(&self, planner: &mut TripPlanner) -> Result<String> {
        let itinerary_id = planner
            .itinerary_id()
            .ok_or(DulichError::NoCurrentItinerary)?
            .to_string();
        let draft = BudgetDraft {
            itinerary_id: itinerary_id.clone(),
            budget_limit: planner.budget_limit(),
            categories: *planner.budget(),
        };

        let existing = match planner.budget_id() {
            Some(id) => Some(id.to_string()),
            None => find_budget_for_itinerary(self.budgets.as_ref(), &itinerary_id)
                .await?
                .map(|record| record.id),
        };
        let record = match existing {
            Some(id) => self.budgets.update_budget(&id, &draft).await?,
            None => self.budgets.create_budget(&draft).await?,
        };
        planner.set_budget_id(record.id.clone());
        info!("Saved budget {} for itinerary {}", record.id, itinerary_id);
        Ok(record.id)
    }

    /// Load an itinerary and its budget into `planner`
    pub async fn load(&self, planner: &mut TripPlanner, itinerary_id: &str) -> Result<Itinerary> {
        let itinerary = self.itineraries.get_itinerary(itinerary_id).await?;
        let budget = find_budget_for_itinerary(self.budgets.as_ref(), itinerary_id).await?;
        planner.load(&itinerary, budget.as_ref())?;
        Ok(itinerary)
    }

    /// Delete an itinerary and, when it is the planner's current one, clear both identifiers.
    ///
    /// The budget record is removed afterwards; failing to remove it is only logged.
    pub async fn delete(&self, planner: &mut TripPlanner, itinerary_id: &str) -> Result<()> {
        self.itineraries.delete_itinerary(itinerary_id).await?;
        if planner.itinerary_id() == Some(itinerary_id) {
            planner.forget_saved();
        }
        info!("Deleted itinerary {}", itinerary_id);

        match find_budget_for_itinerary(self.budgets.as_ref(), itinerary_id).await {
            Ok(Some(record)) => {
                if let Err(e) = self.budgets.delete_budget(&record.id).await {
                    warn!("Budget {} of deleted itinerary left behind: {}", record.id, e);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Could not look up budget of deleted itinerary: {}", e),
        }
        Ok(())
    }
}
