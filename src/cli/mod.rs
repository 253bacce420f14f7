//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, DestinationCommand, DestinationFields, TripCommand};
pub use output::{format_budget, format_destination_list, format_trip, format_vnd};
