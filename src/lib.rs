//! dulich - Travel planner for Vietnamese destinations
//!
//! Keeps a catalog of destinations, schedules them into day-by-day
//! itineraries under a 24 hour daily limit, and derives a five-category
//! budget from the stops. Trips and budgets are stored in remote REST
//! collections or a local JSON file.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DulichError;
