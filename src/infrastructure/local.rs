//! Local store: all collections in one JSON document, in memory or on disk

use crate::domain::{
    BudgetDraft, BudgetRecord, Destination, DestinationDraft, Itinerary, ItineraryDraft,
};
use crate::error::{DulichError, Result};
use crate::infrastructure::store::{BudgetStore, DestinationStore, ItineraryStore};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Collections {
    #[serde(default)]
    destinations: Vec<Destination>,
    #[serde(default)]
    itineraries: Vec<Itinerary>,
    #[serde(default)]
    budgets: Vec<BudgetRecord>,
}

/// Store backed by memory and optionally a JSON file rewritten after every mutation
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    data: Mutex<Collections>,
}

impl LocalStore {
    /// Store that lives only as long as the value
    pub fn in_memory() -> Self {
        LocalStore {
            path: None,
            data: Mutex::new(Collections::default()),
        }
    }

    /// Open (or start) the JSON file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Collections::default(),
            Err(e) => return Err(DulichError::Io(e)),
        };
        debug!("Opened local store at {}", path.display());

        Ok(LocalStore {
            path: Some(path.to_path_buf()),
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.data
            .lock()
            .map_err(|_| DulichError::Remote("local store is unavailable".to_string()))
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> Result<T>) -> Result<T> {
        let data = self.lock()?;
        f(&data)
    }

    /// Apply a mutation to a copy, persist it, then commit it.
    ///
    /// If the mutation or the disk write fails, neither memory nor file changes.
    fn write<T>(&self, f: impl FnOnce(&mut Collections) -> Result<T>) -> Result<T> {
        let mut data = self.lock()?;
        let mut next = data.clone();
        let out = f(&mut next)?;
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, serde_json::to_string_pretty(&next)?)?;
        }
        *data = next;
        Ok(out)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(collection: &str, id: &str) -> DulichError {
    DulichError::NotFound(format!("{}/{}", collection, id))
}

#[async_trait]
impl DestinationStore for LocalStore {
    async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.read(|data| Ok(data.destinations.clone()))
    }

    async fn get_destination(&self, id: &str) -> Result<Destination> {
        self.read(|data| {
            data.destinations
                .iter()
                .find(|d| d.id == id)
                .cloned()
                .ok_or_else(|| not_found("Destination", id))
        })
    }

    async fn create_destination(&self, draft: &DestinationDraft) -> Result<Destination> {
        self.write(|data| {
            let destination = Destination::from_draft(new_id(), draft.clone(), Utc::now());
            data.destinations.push(destination.clone());
            Ok(destination)
        })
    }

    async fn update_destination(&self, id: &str, draft: &DestinationDraft) -> Result<Destination> {
        self.write(|data| {
            let slot = data
                .destinations
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| not_found("Destination", id))?;
            let created_at = slot.created_at;
            *slot = Destination::from_draft(id.to_string(), draft.clone(), Utc::now());
            slot.created_at = created_at;
            Ok(slot.clone())
        })
    }

    async fn delete_destination(&self, id: &str) -> Result<()> {
        self.write(|data| {
            let index = data
                .destinations
                .iter()
                .position(|d| d.id == id)
                .ok_or_else(|| not_found("Destination", id))?;
            data.destinations.remove(index);
            Ok(())
        })
    }
}

#[async_trait]
impl ItineraryStore for LocalStore {
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>> {
        self.read(|data| Ok(data.itineraries.clone()))
    }

    async fn get_itinerary(&self, id: &str) -> Result<Itinerary> {
        self.read(|data| {
            data.itineraries
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| not_found("Itinerary", id))
        })
    }

    async fn create_itinerary(&self, draft: &ItineraryDraft) -> Result<Itinerary> {
        self.write(|data| {
            let itinerary = Itinerary::from_draft(new_id(), draft.clone());
            data.itineraries.push(itinerary.clone());
            Ok(itinerary)
        })
    }

    async fn update_itinerary(&self, id: &str, draft: &ItineraryDraft) -> Result<Itinerary> {
        self.write(|data| {
            let slot = data
                .itineraries
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| not_found("Itinerary", id))?;
            *slot = Itinerary::from_draft(id.to_string(), draft.clone());
            Ok(slot.clone())
        })
    }

    async fn delete_itinerary(&self, id: &str) -> Result<()> {
        self.write(|data| {
            let index = data
                .itineraries
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| not_found("Itinerary", id))?;
            data.itineraries.remove(index);
            Ok(())
        })
    }
}

#[async_trait]
impl BudgetStore for LocalStore {
    async fn list_budgets(&self, itinerary_id: Option<&str>) -> Result<Vec<BudgetRecord>> {
        self.read(|data| {
            Ok(data
                .budgets
                .iter()
                .filter(|b| itinerary_id.map_or(true, |id| b.itinerary_id == id))
                .cloned()
                .collect())
        })
    }

    async fn create_budget(&self, draft: &BudgetDraft) -> Result<BudgetRecord> {
        self.write(|data| {
            let now = Utc::now();
            let record = BudgetRecord {
                id: new_id(),
                itinerary_id: draft.itinerary_id.clone(),
                budget_limit: draft.budget_limit,
                categories: draft.categories,
                created_at: Some(now),
                updated_at: Some(now),
            };
            data.budgets.push(record.clone());
            Ok(record)
        })
    }

    async fn update_budget(&self, id: &str, draft: &BudgetDraft) -> Result<BudgetRecord> {
        self.write(|data| {
            let slot = data
                .budgets
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| not_found("budgets", id))?;
            slot.itinerary_id = draft.itinerary_id.clone();
            slot.budget_limit = draft.budget_limit;
            slot.categories = draft.categories;
            slot.updated_at = Some(Utc::now());
            Ok(slot.clone())
        })
    }

    async fn delete_budget(&self, id: &str) -> Result<()> {
        self.write(|data| {
            let index = data
                .budgets
                .iter()
                .position(|b| b.id == id)
                .ok_or_else(|| not_found("budgets", id))?;
            data.budgets.remove(index);
            Ok(())
        })
    }
}
