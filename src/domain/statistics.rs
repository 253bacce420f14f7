//! Catalog and trip statistics for the admin overview

use crate::domain::budget::{ACTIVITIES_RATE, OTHER_RATE};
use crate::domain::itinerary::find_destination;
use crate::domain::{Budget, Destination, DestinationType, Itinerary};
use chrono::Datelike;

/// How many destinations the top-rated list holds
pub const TOP_RATED_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationStats {
    /// Count per type, only for types present
    pub type_counts: Vec<(DestinationType, usize)>,
    /// Mean cost per category; activities and other follow the budget rates
    pub average_costs: Budget,
    pub average_rating: f64,
    pub top_rated: Vec<Destination>,
}

pub fn destination_stats(destinations: &[Destination]) -> DestinationStats {
    if destinations.is_empty() {
        return DestinationStats::default();
    }
    let count = destinations.len() as f64;

    let type_counts = DestinationType::ALL
        .into_iter()
        .map(|kind| (kind, destinations.iter().filter(|d| d.kind == kind).count()))
        .filter(|(_, n)| *n > 0)
        .collect();

    let mean = |f: fn(&Destination) -> f64| destinations.iter().map(f).sum::<f64>() / count;
    let food = mean(|d| d.food_cost);
    let accommodation = mean(|d| d.accommodation_cost);
    let transportation = mean(|d| d.transportation_cost);
    let base = food + accommodation + transportation;

    let mut top_rated = destinations.to_vec();
    top_rated.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    top_rated.truncate(TOP_RATED_LIMIT);

    DestinationStats {
        type_counts,
        average_costs: Budget {
            food,
            accommodation,
            transportation,
            activities: base * ACTIVITIES_RATE,
            other: base * OTHER_RATE,
        },
        average_rating: mean(|d| d.average_rating),
        top_rated,
    }
}

/// Trips starting in one month and their estimated revenue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPlans {
    /// 1 = January
    pub month: u32,
    pub trips: usize,
    pub revenue: f64,
}

/// Per-month trip counts for `year`, January to December.
///
/// Revenue is the full cost (base plus activities and other) of every visit
/// whose destination still exists.
pub fn monthly_plans(itineraries: &[Itinerary], destinations: &[Destination], year: i32) -> Vec<MonthlyPlans> {
    let mut months: Vec<MonthlyPlans> = (1..=12)
        .map(|month| MonthlyPlans {
            month,
            trips: 0,
            revenue: 0.0,
        })
        .collect();

    for itinerary in itineraries.iter().filter(|i| i.start_date.year() == year) {
        let slot = &mut months[itinerary.start_date.month0() as usize];
        slot.trips += 1;
        slot.revenue += itinerary
            .destinations
            .iter()
            .filter_map(|item| find_destination(destinations, &item.destination_id))
            .map(|dest| {
                let base = dest.base_cost();
                base + base * ACTIVITIES_RATE + base * OTHER_RATE
            })
            .sum::<f64>();
    }
    months
}
