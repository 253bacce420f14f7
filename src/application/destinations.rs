//! Destination management use cases

use crate::domain::{Destination, DestinationDraft, DestinationFilter};
use crate::error::Result;
use crate::infrastructure::{DestinationStore, Stores};
use std::sync::Arc;
use tracing::info;

/// Service for browsing and editing destinations.
///
/// It keeps no cache: callers re-list after a change.
pub struct DestinationService {
    store: Arc<dyn DestinationStore>,
}

impl DestinationService {
    pub fn new(stores: &Stores) -> Self {
        DestinationService {
            store: stores.destinations.clone(),
        }
    }

    /// Fetch all destinations and run them through `filter`
    pub async fn list(&self, filter: &DestinationFilter) -> Result<Vec<Destination>> {
        let destinations = self.store.list_destinations().await?;
        Ok(filter.apply(&destinations))
    }

    pub async fn get(&self, id: &str) -> Result<Destination> {
        self.store.get_destination(id).await
    }

    pub async fn create(&self, draft: &DestinationDraft) -> Result<Destination> {
        draft.validate()?;
        let created = self.store.create_destination(draft).await?;
        info!("Created destination {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(&self, id: &str, draft: &DestinationDraft) -> Result<Destination> {
        draft.validate()?;
        let updated = self.store.update_destination(id, draft).await?;
        info!("Updated destination {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_destination(id).await?;
        info!("Deleted destination {}", id);
        Ok(())
    }
}
