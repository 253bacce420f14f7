//! Statistics overview use case

use crate::domain::{destination_stats, monthly_plans, DestinationStats, MonthlyPlans};
use crate::error::Result;
use crate::infrastructure::{DestinationStore, ItineraryStore, Stores};
use std::sync::Arc;

/// Catalog statistics plus trips per month of one year
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub year: i32,
    pub destinations: DestinationStats,
    pub months: Vec<MonthlyPlans>,
}

impl StatisticsReport {
    pub fn total_trips(&self) -> usize {
        self.months.iter().map(|m| m.trips).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        self.months.iter().map(|m| m.revenue).sum()
    }

    /// Month with the highest revenue; the earliest wins a tie
    pub fn best_month(&self) -> Option<&MonthlyPlans> {
        self.months
            .iter()
            .filter(|m| m.revenue > 0.0)
            .fold(None, |best: Option<&MonthlyPlans>, m| match best {
                Some(b) if b.revenue >= m.revenue => Some(b),
                _ => Some(m),
            })
    }
}

pub struct StatisticsService {
    destinations: Arc<dyn DestinationStore>,
    itineraries: Arc<dyn ItineraryStore>,
}

impl StatisticsService {
    pub fn new(stores: &Stores) -> Self {
        StatisticsService {
            destinations: stores.destinations.clone(),
            itineraries: stores.itineraries.clone(),
        }
    }

    pub async fn report(&self, year: i32) -> Result<StatisticsReport> {
        let destinations = self.destinations.list_destinations().await?;
        let itineraries = self.itineraries.list_itineraries().await?;

        Ok(StatisticsReport {
            year,
            destinations: destination_stats(&destinations),
            months: monthly_plans(&itineraries, &destinations, year),
        })
    }
}
