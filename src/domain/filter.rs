//! Destination browsing: filters and sort orders

use crate::domain::{Destination, DestinationType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display order of a filtered destination list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Highest average rating first
    RatingDesc,
    /// Cheapest base cost first
    PriceAsc,
    /// Most expensive base cost first
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rating-desc" => Ok(SortOrder::RatingDesc),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            _ => Err(format!(
                "Invalid sort order: '{}'. Valid orders are: rating-desc, price-asc, price-desc",
                s
            )),
        }
    }
}

/// Optional criteria; unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationFilter {
    pub kind: Option<DestinationType>,
    /// Keep destinations whose base cost is at most this amount
    pub max_price: Option<f64>,
    /// Keep destinations rated at least this
    pub min_rating: Option<f64>,
    pub sort: Option<SortOrder>,
}

impl DestinationFilter {
    pub fn matches(&self, destination: &Destination) -> bool {
        self.kind.map_or(true, |kind| destination.kind == kind)
            && self
                .max_price
                .map_or(true, |max| destination.base_cost() <= max)
            && self
                .min_rating
                .map_or(true, |min| destination.average_rating >= min)
    }

    /// Filter and sort a copy of `destinations`.
    ///
    /// Sorting is stable, so equal keys and an unset sort keep the input order.
    pub fn apply(&self, destinations: &[Destination]) -> Vec<Destination> {
        let mut result: Vec<Destination> = destinations
            .iter()
            .filter(|dest| self.matches(dest))
            .cloned()
            .collect();

        match self.sort {
            Some(SortOrder::RatingDesc) => {
                result.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating))
            }
            Some(SortOrder::PriceAsc) => result.sort_by(|a, b| a.base_cost().total_cmp(&b.base_cost())),
            Some(SortOrder::PriceDesc) => result.sort_by(|a, b| b.base_cost().total_cmp(&a.base_cost())),
            None => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::destination::fixtures::destination;

    fn catalog() -> Vec<Destination> {
        let mut beach = destination("beach", 4.0, 100.0, 300.0, 100.0);
        beach.kind = DestinationType::Beach;
        beach.average_rating = 4.5;

        let mut mountain = destination("mountain", 8.0, 200.0, 500.0, 300.0);
        mountain.kind = DestinationType::Mountain;
        mountain.average_rating = 3.5;

        let mut city = destination("city", 3.0, 50.0, 100.0, 50.0);
        city.average_rating = 4.5;

        let mut city2 = destination("city2", 5.0, 300.0, 200.0, 100.0);
        city2.average_rating = 5.0;

        vec![beach, mountain, city, city2]
    }

    fn ids(list: &[Destination]) -> Vec<&str> {
        list.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_no_filter_keeps_order() {
        let dests = catalog();
        let result = DestinationFilter::default().apply(&dests);
        assert_eq!(ids(&result), vec!["beach", "mountain", "city", "city2"]);
    }

    #[test]
    fn test_type_filter() {
        let filter = DestinationFilter {
            kind: Some(DestinationType::City),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&catalog())), vec!["city", "city2"]);
    }

    #[test]
    fn test_price_ceiling_inclusive() {
        let filter = DestinationFilter {
            max_price: Some(500.0),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(ids(&result), vec!["beach", "city"]);
        assert!(result.iter().all(|d| d.base_cost() <= 500.0));
    }

    #[test]
    fn test_min_rating() {
        let filter = DestinationFilter {
            min_rating: Some(4.5),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(ids(&result), vec!["beach", "city", "city2"]);
        assert!(result.iter().all(|d| d.average_rating >= 4.5));
    }

    #[test]
    fn test_filters_combine() {
        let filter = DestinationFilter {
            kind: Some(DestinationType::City),
            max_price: Some(500.0),
            min_rating: Some(4.0),
            sort: None,
        };
        assert_eq!(ids(&filter.apply(&catalog())), vec!["city"]);
    }

    #[test]
    fn test_rating_desc_is_stable() {
        let filter = DestinationFilter {
            sort: Some(SortOrder::RatingDesc),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(ids(&result), vec!["city2", "beach", "city", "mountain"]);
        assert!(result
            .windows(2)
            .all(|w| w[0].average_rating >= w[1].average_rating));
    }

    #[test]
    fn test_price_orders() {
        let dests = catalog();
        let asc = DestinationFilter {
            sort: Some(SortOrder::PriceAsc),
            ..Default::default()
        }
        .apply(&dests);
        assert_eq!(ids(&asc), vec!["city", "beach", "city2", "mountain"]);

        let desc = DestinationFilter {
            sort: Some(SortOrder::PriceDesc),
            ..Default::default()
        }
        .apply(&dests);
        assert_eq!(ids(&desc), vec!["mountain", "city2", "beach", "city"]);
    }

    #[test]
    fn test_repeated_apply_unchanged() {
        let dests = catalog();
        let filter = DestinationFilter {
            min_rating: Some(4.0),
            sort: Some(SortOrder::PriceDesc),
            ..Default::default()
        };
        assert_eq!(filter.apply(&dests), filter.apply(&dests));
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!(
            SortOrder::from_str("rating-desc").unwrap(),
            SortOrder::RatingDesc
        );
        assert!(SortOrder::from_str("name").is_err());
    }
}
