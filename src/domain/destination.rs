//! Destination entities and validation

use crate::error::{DulichError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of place a destination is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Beach,
    Mountain,
    City,
}

impl DestinationType {
    pub const ALL: [DestinationType; 3] = [
        DestinationType::Beach,
        DestinationType::Mountain,
        DestinationType::City,
    ];

    /// Wire name used by the remote collection
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Beach => "beach",
            DestinationType::Mountain => "mountain",
            DestinationType::City => "city",
        }
    }

    /// Vietnamese display label
    pub fn label(&self) -> &'static str {
        match self {
            DestinationType::Beach => "Biển",
            DestinationType::Mountain => "Núi",
            DestinationType::City => "Thành phố",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beach" => Ok(DestinationType::Beach),
            "mountain" => Ok(DestinationType::Mountain),
            "city" => Ok(DestinationType::City),
            _ => Err(format!(
                "Invalid destination type: '{}'. Valid types are: beach, mountain, city",
                s
            )),
        }
    }
}

/// A point of interest with cost and rating attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: DestinationType,
    #[serde(default)]
    pub image_url: String,
    /// Hours needed to visit
    pub visit_duration: f64,
    pub average_rating: f64,
    #[serde(default)]
    pub food_cost: f64,
    #[serde(default)]
    pub accommodation_cost: f64,
    #[serde(default)]
    pub transportation_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Destination {
    /// Build a stored destination from a draft
    pub fn from_draft(id: String, draft: DestinationDraft, now: DateTime<Utc>) -> Self {
        Destination {
            id,
            name: draft.name,
            description: draft.description,
            location: draft.location,
            kind: draft.kind,
            image_url: draft.image_url,
            visit_duration: draft.visit_duration,
            average_rating: draft.average_rating,
            food_cost: draft.food_cost,
            accommodation_cost: draft.accommodation_cost,
            transportation_cost: draft.transportation_cost,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Food + accommodation + transportation
    pub fn base_cost(&self) -> f64 {
        self.food_cost + self.accommodation_cost + self.transportation_cost
    }

    /// Editable fields of this destination
    pub fn to_draft(&self) -> DestinationDraft {
        DestinationDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            kind: self.kind,
            image_url: self.image_url.clone(),
            visit_duration: self.visit_duration,
            average_rating: self.average_rating,
            food_cost: self.food_cost,
            accommodation_cost: self.accommodation_cost,
            transportation_cost: self.transportation_cost,
        }
    }
}

/// Create/update payload; the store assigns identifiers and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: DestinationType,
    #[serde(default)]
    pub image_url: String,
    pub visit_duration: f64,
    pub average_rating: f64,
    pub food_cost: f64,
    pub accommodation_cost: f64,
    pub transportation_cost: f64,
}

impl DestinationDraft {
    /// Check field constraints before anything is sent to a store
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DulichError::Validation("name is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(DulichError::Validation("location is required".to_string()));
        }
        if !(self.visit_duration.is_finite() && self.visit_duration > 0.0) {
            return Err(DulichError::Validation(format!(
                "visit duration must be positive, got {}",
                self.visit_duration
            )));
        }
        if !(0.0..=5.0).contains(&self.average_rating) || (self.average_rating * 2.0).fract() != 0.0
        {
            return Err(DulichError::Validation(format!(
                "rating must be between 0 and 5 in steps of 0.5, got {}",
                self.average_rating
            )));
        }
        for (field, value) in [
            ("food cost", self.food_cost),
            ("accommodation cost", self.accommodation_cost),
            ("transportation cost", self.transportation_cost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DulichError::Validation(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}
