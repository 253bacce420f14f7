//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dulich")]
#[command(about = "Travel planner for Vietnamese destinations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $DULICH_CONFIG or ./dulich.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new config file
    Init {
        /// Storage backend (rest, local)
        #[arg(short, long, default_value = "rest")]
        backend: String,

        /// JSON file used by the local backend
        #[arg(long, value_name = "PATH")]
        data_file: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Browse and edit destinations
    #[command(subcommand)]
    Destination(DestinationCommand),

    /// Plan, budget and store trips
    #[command(subcommand)]
    Trip(TripCommand),

    /// Destination and trip statistics
    Stats {
        /// Year for the monthly overview (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DestinationCommand {
    /// List destinations, optionally filtered and sorted
    List {
        /// Only this type (beach, mountain, city)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Maximum base cost in đồng
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum average rating
        #[arg(long)]
        min_rating: Option<f64>,

        /// Sort order (rating-desc, price-asc, price-desc)
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Show one destination with its cost split
    Show { id: String },

    /// Create a destination
    Add(DestinationFields),

    /// Change fields of a destination
    Update {
        id: String,

        #[command(flatten)]
        fields: DestinationFields,
    },

    /// Delete a destination
    Delete { id: String },
}

/// Destination fields; `add` requires name, location, type and visit duration
#[derive(Args, Debug, Default)]
pub struct DestinationFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// beach, mountain or city
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Hours needed for a visit
    #[arg(long)]
    pub hours: Option<f64>,

    /// Average rating, 0 to 5 in steps of 0.5
    #[arg(long)]
    pub rating: Option<f64>,

    #[arg(long)]
    pub food: Option<f64>,

    #[arg(long)]
    pub stay: Option<f64>,

    #[arg(long)]
    pub transport: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum TripCommand {
    /// List saved trips
    List,

    /// Create an empty trip
    Create {
        #[arg(long)]
        name: String,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Budget limit in đồng
        #[arg(long)]
        limit: Option<f64>,
    },

    /// Change the name or dates of a trip
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// Show a trip day by day with its budget
    Show { id: String },

    /// Schedule a destination
    Add {
        trip: String,

        destination: String,

        #[arg(short, long)]
        day: u32,

        /// Position within the day (default: last)
        #[arg(short, long)]
        order: Option<u32>,
    },

    /// Unschedule a destination from a day
    Remove {
        trip: String,

        destination: String,

        #[arg(short, long)]
        day: u32,
    },

    /// Move a stop to another position or day
    Move {
        trip: String,

        #[arg(long)]
        from_day: u32,

        #[arg(long)]
        from_order: u32,

        #[arg(long)]
        to_day: u32,

        /// Zero-based slot in the target day
        #[arg(long)]
        to_index: usize,
    },

    /// Show the budget, or set its limit
    Budget {
        id: String,

        /// New budget limit in đồng
        #[arg(long)]
        limit: Option<f64>,
    },

    /// Delete a trip and its budget
    Delete { id: String },
}
