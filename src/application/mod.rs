//! Application layer - Use cases and orchestration

pub mod destinations;
pub mod init;
pub mod manage_config;
pub mod planner;
pub mod save_trip;
pub mod statistics;

pub use destinations::DestinationService;
pub use manage_config::ConfigService;
pub use planner::{FetchTicket, TripDetails, TripPlanner};
pub use save_trip::{SaveOutcome, TripService};
pub use statistics::{StatisticsReport, StatisticsService};
