//! Itinerary items, the in-memory plan aggregate and the persisted itinerary record
//!
//! Every plan operation takes `&self` and returns a new plan, so a rejected
//! operation can never leave a half-applied change behind. After every
//! successful operation the items are sorted by (day, order) and each day's
//! orders form the contiguous sequence 1..=N.

use crate::domain::Destination;
use crate::error::{DulichError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Most hours that can be scheduled on one day
pub const MAX_DAY_HOURS: f64 = 24.0;

/// Hours of travel counted between two consecutive stops of the same day
pub const TRAVEL_HOURS_BETWEEN_STOPS: f64 = 1.0;

/// One scheduled visit: destination + 1-based day + 1-based order within the day
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub destination_id: String,
    pub day: u32,
    pub order: u32,
}

impl ItineraryItem {
    pub fn new(destination_id: impl Into<String>, day: u32, order: u32) -> Self {
        ItineraryItem {
            destination_id: destination_id.into(),
            day,
            order,
        }
    }
}

/// Ordered, day-partitioned list of visits plus the user-set budget limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryPlan {
    items: Vec<ItineraryItem>,
    budget_limit: f64,
}

impl ItineraryPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from stored items, repairing order gaps or duplicates.
    ///
    /// Items are sorted by (day, order), ties keep their stored position, and
    /// each day is renumbered 1..=N. Items with day 0 are moved to day 1.
    pub fn from_items(items: Vec<ItineraryItem>) -> Self {
        let mut items: Vec<ItineraryItem> = items
            .into_iter()
            .map(|mut item| {
                item.day = item.day.max(1);
                item
            })
            .collect();
        items.sort_by_key(|item| (item.day, item.order));

        let mut plan = ItineraryPlan {
            items,
            budget_limit: 0.0,
        };
        for day in plan.days() {
            plan.renumber_day(day);
        }
        plan
    }

    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ItineraryItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn budget_limit(&self) -> f64 {
        self.budget_limit
    }

    /// Days that have at least one item, ascending
    pub fn days(&self) -> Vec<u32> {
        self.items
            .iter()
            .map(|item| item.day)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Items of one day in visiting order
    pub fn day_items(&self, day: u32) -> Vec<&ItineraryItem> {
        let mut items: Vec<&ItineraryItem> =
            self.items.iter().filter(|item| item.day == day).collect();
        items.sort_by_key(|item| item.order);
        items
    }

    /// Scheduled hours for a day: visit durations plus travel between consecutive stops.
    ///
    /// Items whose destination no longer exists add no visit hours but still
    /// count as a stop.
    pub fn day_hours(&self, day: u32, destinations: &[Destination]) -> f64 {
        let stops = self.day_items(day);
        let visits: f64 = stops
            .iter()
            .filter_map(|item| find_destination(destinations, &item.destination_id))
            .map(|dest| dest.visit_duration)
            .sum();
        visits + travel_hours(stops.len())
    }

    /// Hours a day would total after adding one more stop of `visit_duration` hours
    pub fn projected_day_hours(
        &self,
        day: u32,
        visit_duration: f64,
        destinations: &[Destination],
    ) -> f64 {
        let stops = self.day_items(day).len();
        self.day_hours(day, destinations) + visit_duration + travel_hours(stops + 1)
            - travel_hours(stops)
    }

    /// Sum of all day totals, each day capped at 24 hours
    pub fn total_hours(&self, destinations: &[Destination]) -> f64 {
        self.days()
            .into_iter()
            .map(|day| self.day_hours(day, destinations).min(MAX_DAY_HOURS))
            .sum()
    }

    /// Add a destination to `day` at position `order`.
    ///
    /// Existing items of that day at or after `order` move down one place;
    /// an `order` past the end of the day appends. Fails with
    /// `CapacityExceeded` when the day would exceed 24 hours.
    pub fn add_item(
        &self,
        destination_id: &str,
        day: u32,
        order: u32,
        destinations: &[Destination],
    ) -> Result<Self> {
        check_position(day, order)?;
        let destination = find_destination(destinations, destination_id)
            .ok_or_else(|| DulichError::UnknownDestination(destination_id.to_string()))?;

        self.check_capacity(day, destination.visit_duration, destinations)?;

        let mut next = self.clone();
        next.insert_at(
            ItineraryItem::new(destination_id, day, order),
            (order - 1) as usize,
        );
        Ok(next)
    }

    /// Add a destination as the last stop of `day`
    pub fn append_item(
        &self,
        destination_id: &str,
        day: u32,
        destinations: &[Destination],
    ) -> Result<Self> {
        let order = self.day_items(day).len() as u32 + 1;
        self.add_item(destination_id, day, order, destinations)
    }

    /// Remove the first item matching destination and day; absent items are ignored.
    pub fn remove_item(&self, destination_id: &str, day: u32) -> Self {
        let mut next = self.clone();
        if let Some(index) = next
            .items
            .iter()
            .position(|item| item.destination_id == destination_id && item.day == day)
        {
            next.items.remove(index);
            next.renumber_day(day);
        }
        next
    }

    /// Move the item at (`source_day`, `source_order`) to 0-based `destination_index`
    /// of `destination_day`.
    ///
    /// Removal closes the gap on the source day (later orders decrement) and
    /// insertion opens one on the destination day (orders at or after the
    /// index increment); the same two passes serve both same-day and
    /// cross-day moves. An index past the end appends. Moving into another
    /// day is subject to the same 24 hour rule as adding.
    pub fn reorder(
        &self,
        source_day: u32,
        source_order: u32,
        destination_day: u32,
        destination_index: usize,
        destinations: &[Destination],
    ) -> Result<Self> {
        check_position(source_day, source_order)?;
        check_position(destination_day, 1)?;

        let mut next = self.clone();
        let index = next
            .items
            .iter()
            .position(|item| item.day == source_day && item.order == source_order)
            .ok_or(DulichError::ItemNotFound {
                day: source_day,
                order: source_order,
            })?;
        let mut moved = next.items.remove(index);
        next.close_gap(source_day, source_order);

        if destination_day != source_day {
            let visit = find_destination(destinations, &moved.destination_id)
                .map(|dest| dest.visit_duration)
                .unwrap_or(0.0);
            next.check_capacity(destination_day, visit, destinations)?;
        }

        moved.day = destination_day;
        next.insert_at(moved, destination_index);
        Ok(next)
    }

    /// Store the budget limit; nothing is recomputed
    pub fn with_budget_limit(&self, limit: f64) -> Result<Self> {
        if !(limit.is_finite() && limit >= 0.0) {
            return Err(DulichError::Validation(format!(
                "budget limit must not be negative, got {}",
                limit
            )));
        }
        let mut next = self.clone();
        next.budget_limit = limit;
        Ok(next)
    }

    fn check_capacity(&self, day: u32, visit_duration: f64, destinations: &[Destination]) -> Result<()> {
        let hours = self.projected_day_hours(day, visit_duration, destinations);
        if hours > MAX_DAY_HOURS {
            return Err(DulichError::CapacityExceeded { day, hours });
        }
        Ok(())
    }

    /// Insert `item` at 0-based `index` of its day, shifting later items down
    fn insert_at(&mut self, mut item: ItineraryItem, index: usize) {
        let count = self.items.iter().filter(|i| i.day == item.day).count();
        let order = index.min(count) as u32 + 1;
        for existing in self.items.iter_mut().filter(|i| i.day == item.day) {
            if existing.order >= order {
                existing.order += 1;
            }
        }
        item.order = order;
        self.items.push(item);
        self.sort();
    }

    /// Decrement orders after a removed `order`
    fn close_gap(&mut self, day: u32, order: u32) {
        for item in self.items.iter_mut().filter(|i| i.day == day) {
            if item.order > order {
                item.order -= 1;
            }
        }
    }

    fn renumber_day(&mut self, day: u32) {
        let mut next = 1;
        for item in self.items.iter_mut().filter(|i| i.day == day) {
            item.order = next;
            next += 1;
        }
    }

    fn sort(&mut self) {
        self.items.sort_by_key(|item| (item.day, item.order));
    }
}

fn check_position(day: u32, order: u32) -> Result<()> {
    if day == 0 {
        return Err(DulichError::InvalidPosition("day starts at 1".to_string()));
    }
    if order == 0 {
        return Err(DulichError::InvalidPosition("order starts at 1".to_string()));
    }
    Ok(())
}

fn travel_hours(stops: usize) -> f64 {
    stops.saturating_sub(1) as f64 * TRAVEL_HOURS_BETWEEN_STOPS
}

/// Look up a destination by identifier
pub fn find_destination<'a>(destinations: &'a [Destination], id: &str) -> Option<&'a Destination> {
    destinations.iter().find(|dest| dest.id == id)
}

/// Number of calendar days from `start` to `end`, both included
pub fn trip_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days() + 1;
    days.max(0) as u32
}

/// Persisted itinerary record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub destinations: Vec<ItineraryItem>,
}

impl Itinerary {
    pub fn from_draft(id: String, draft: ItineraryDraft) -> Self {
        Itinerary {
            id,
            name: draft.name,
            start_date: draft.start_date,
            end_date: draft.end_date,
            destinations: draft.destinations,
        }
    }

    pub fn day_count(&self) -> u32 {
        trip_day_count(self.start_date, self.end_date)
    }

    /// Calendar date of 1-based `day`
    pub fn date_of_day(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.day_count() {
            return None;
        }
        Some(self.start_date + Duration::days(i64::from(day) - 1))
    }

    pub fn to_draft(&self) -> ItineraryDraft {
        ItineraryDraft {
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            destinations: self.destinations.clone(),
        }
    }
}

/// Create/update payload for an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDraft {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub destinations: Vec<ItineraryItem>,
}

impl ItineraryDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DulichError::Validation(
                "itinerary name is required".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(DulichError::Validation(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        let days = trip_day_count(self.start_date, self.end_date);
        if let Some(item) = self.destinations.iter().find(|item| item.day > days) {
            return Err(DulichError::DayOutOfRange {
                day: item.day,
                days,
            });
        }
        Ok(())
    }
}
