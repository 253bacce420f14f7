//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod local;
pub mod logging;
pub mod rest;
pub mod store;

pub use config::{Backend, Config};
pub use local::LocalStore;
pub use rest::RestStore;
pub use store::{find_budget_for_itinerary, BudgetStore, DestinationStore, ItineraryStore};

use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Handles to the three collections, usually backed by one store
#[derive(Clone)]
pub struct Stores {
    pub destinations: Arc<dyn DestinationStore>,
    pub itineraries: Arc<dyn ItineraryStore>,
    pub budgets: Arc<dyn BudgetStore>,
}

impl Stores {
    /// Share one store across all collections
    pub fn shared<S>(store: S) -> Self
    where
        S: DestinationStore + ItineraryStore + BudgetStore + 'static,
    {
        let store = Arc::new(store);
        Stores {
            destinations: store.clone(),
            itineraries: store.clone(),
            budgets: store,
        }
    }

    /// Open the backend selected by `config`
    pub fn open(config: &Config, config_path: &Path) -> Result<Self> {
        match config.backend {
            Backend::Rest => Ok(Self::shared(RestStore::new(config)?)),
            Backend::Local => Ok(Self::shared(LocalStore::open(
                &config.data_file_path(config_path),
            )?)),
        }
    }
}
