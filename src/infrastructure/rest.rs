//! REST client for the remote collections

use crate::domain::{
    BudgetDraft, BudgetRecord, Destination, DestinationDraft, Itinerary, ItineraryDraft,
};
use crate::error::{DulichError, Result};
use crate::infrastructure::store::{BudgetStore, DestinationStore, ItineraryStore};
use crate::infrastructure::Config;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Budget payload with client-side timestamps
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimestampedBudget<'a> {
    #[serde(flatten)]
    draft: &'a BudgetDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// HTTP store over three JSON collections (list/get/create/update/delete).
///
/// Item URLs are `<collection>/<id>`; the store assigns identifiers on create.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    destinations_url: String,
    itineraries_url: String,
    budgets_url: String,
}

impl RestStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DulichError::Remote(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(RestStore {
            client,
            destinations_url: config.destinations_url.trim_end_matches('/').to_string(),
            itineraries_url: config.itineraries_url.trim_end_matches('/').to_string(),
            budgets_url: config.budgets_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DulichError::Remote(format!("Request failed: {}", e)))?;
        parse_response(url, response).await
    }

    async fn send<B, T>(&self, method: Method, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| DulichError::Remote(format!("Request failed: {}", e)))?;
        parse_response(url, response).await
    }

    async fn delete(&self, url: &str) -> Result<()> {
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| DulichError::Remote(format!("Request failed: {}", e)))?;
        check_status(url, response).await.map(|_| ())
    }
}

fn item_url(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, id)
}

/// Map non-success statuses to errors and return the body text
async fn check_status(url: &str, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DulichError::Remote(format!("Failed to read response: {}", e)))?;

    if status == StatusCode::NOT_FOUND {
        return Err(DulichError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(DulichError::Remote(format!(
            "{} returned {}: {}",
            url,
            status,
            body.chars().take(200).collect::<String>()
        )));
    }
    Ok(body)
}

async fn parse_response<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let body = check_status(url, response).await?;
    serde_json::from_str(&body)
        .map_err(|e| DulichError::Remote(format!("Failed to parse response from {}: {}", url, e)))
}

#[async_trait]
impl DestinationStore for RestStore {
    async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.get(&self.destinations_url).await
    }

    async fn get_destination(&self, id: &str) -> Result<Destination> {
        self.get(&item_url(&self.destinations_url, id)).await
    }

    async fn create_destination(&self, draft: &DestinationDraft) -> Result<Destination> {
        self.send(Method::POST, &self.destinations_url, draft).await
    }

    async fn update_destination(&self, id: &str, draft: &DestinationDraft) -> Result<Destination> {
        self.send(Method::PUT, &item_url(&self.destinations_url, id), draft)
            .await
    }

    async fn delete_destination(&self, id: &str) -> Result<()> {
        self.delete(&item_url(&self.destinations_url, id)).await
    }
}

#[async_trait]
impl ItineraryStore for RestStore {
    async fn list_itineraries(&self) -> Result<Vec<Itinerary>> {
        self.get(&self.itineraries_url).await
    }

    async fn get_itinerary(&self, id: &str) -> Result<Itinerary> {
        self.get(&item_url(&self.itineraries_url, id)).await
    }

    async fn create_itinerary(&self, draft: &ItineraryDraft) -> Result<Itinerary> {
        self.send(Method::POST, &self.itineraries_url, draft).await
    }

    async fn update_itinerary(&self, id: &str, draft: &ItineraryDraft) -> Result<Itinerary> {
        self.send(Method::PUT, &item_url(&self.itineraries_url, id), draft)
            .await
    }

    async fn delete_itinerary(&self, id: &str) -> Result<()> {
        self.delete(&item_url(&self.itineraries_url, id)).await
    }
}

#[async_trait]
impl BudgetStore for RestStore {
    async fn list_budgets(&self, itinerary_id: Option<&str>) -> Result<Vec<BudgetRecord>> {
        let Some(itinerary_id) = itinerary_id else {
            return self.get(&self.budgets_url).await;
        };

        debug!("GET {}?itineraryId={}", self.budgets_url, itinerary_id);
        let response = self
            .client
            .get(&self.budgets_url)
            .query(&[("itineraryId", itinerary_id)])
            .send()
            .await
            .map_err(|e| DulichError::Remote(format!("Request failed: {}", e)))?;

        // Filtered queries with no match answer 404 on some mock backends
        match parse_response(&self.budgets_url, response).await {
            Err(DulichError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn create_budget(&self, draft: &BudgetDraft) -> Result<BudgetRecord> {
        let now = Utc::now();
        let payload = TimestampedBudget {
            draft,
            created_at: Some(now),
            updated_at: now,
        };
        self.send(Method::POST, &self.budgets_url, &payload).await
    }

    async fn update_budget(&self, id: &str, draft: &BudgetDraft) -> Result<BudgetRecord> {
        let payload = TimestampedBudget {
            draft,
            created_at: None,
            updated_at: Utc::now(),
        };
        self.send(Method::PUT, &item_url(&self.budgets_url, id), &payload)
            .await
    }

    async fn delete_budget(&self, id: &str) -> Result<()> {
        self.delete(&item_url(&self.budgets_url, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Budget;

    #[test]
    fn test_new_trims_trailing_slash() {
        let mut config = Config::default();
        config.budgets_url = "http://localhost:3000/budgets/".to_string();
        let store = RestStore::new(&config).unwrap();
        assert_eq!(store.budgets_url, "http://localhost:3000/budgets");
        assert_eq!(
            item_url(&store.budgets_url, "7"),
            "http://localhost:3000/budgets/7"
        );
    }

    #[test]
    fn test_budget_payload_shape() {
        let draft = BudgetDraft {
            itinerary_id: "3".to_string(),
            budget_limit: 1000.0,
            categories: Budget::default(),
        };
        let payload = TimestampedBudget {
            draft: &draft,
            created_at: None,
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["itineraryId"], "3");
        assert_eq!(value["budgetLimit"], 1000.0);
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("createdAt").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_remote_error() {
        let mut config = Config::default();
        config.destinations_url = "http://127.0.0.1:9/Destination".to_string();
        config.timeout_secs = 2;
        let store = RestStore::new(&config).unwrap();

        let err = store.list_destinations().await.unwrap_err();
        assert!(matches!(err, DulichError::Remote(_)));
    }
}
