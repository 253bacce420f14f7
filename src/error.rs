//! Error types for dulich

use thiserror::Error;

/// Main error type for dulich
#[derive(Debug, Error)]
pub enum DulichError {
    #[error("Day {day} would total {hours} hours, more than 24")]
    CapacityExceeded { day: u32, hours: f64 },

    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    #[error("No itinerary item at day {day}, order {order}")]
    ItemNotFound { day: u32, order: u32 },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Day {day} is outside the trip ({days} days)")]
    DayOutOfRange { day: u32, days: u32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("No itinerary has been saved yet")]
    NoCurrentItinerary,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DulichError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DulichError::Config(_) => 2,
            DulichError::CapacityExceeded { .. }
            | DulichError::InvalidPosition(_)
            | DulichError::DayOutOfRange { .. }
            | DulichError::Validation(_) => 3,
            DulichError::NotFound(_)
            | DulichError::UnknownDestination(_)
            | DulichError::ItemNotFound { .. } => 4,
            DulichError::Remote(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DulichError::CapacityExceeded { day, hours } => {
                format!(
                    "Cannot add this destination to day {}: the day would total {} hours.\n\n\
                    Suggestions:\n\
                    • Schedule the destination on another day\n\
                    • Remove a stop from day {} first\n\
                    • Each day allows at most 24 hours of visits plus 1 hour between stops",
                    day, hours, day
                )
            }
            DulichError::DayOutOfRange { day, days } => {
                format!(
                    "Day {} is outside the trip, which has {} day(s).\n\n\
                    Suggestions:\n\
                    • Pick a day between 1 and {}\n\
                    • Extend the trip dates with 'dulich trip create'",
                    day, days, days
                )
            }
            DulichError::NoCurrentItinerary => "Please save the itinerary before saving its budget.\n\n\
                Suggestions:\n\
                • Create a trip with 'dulich trip create'\n\
                • Use 'dulich trip list' to find an existing trip id"
                .to_string(),
            DulichError::Remote(msg) => {
                format!(
                    "Remote error: {}\n\n\
                    Suggestions:\n\
                    • Check your network connection and retry\n\
                    • Verify the collection URLs: dulich config --list\n\
                    • Switch to offline storage: dulich config backend local",
                    msg
                )
            }
            DulichError::Validation(msg) if msg.contains("date format") => {
                format!(
                    "Validation error: {}\n\n\
                    Expected format: YYYY-MM-DD\n\
                    Example: dulich trip create --name 'Đà Lạt' --start 2025-06-01 --end 2025-06-03",
                    msg
                )
            }
            DulichError::Config(msg) => {
                if msg.contains("Invalid backend") {
                    format!(
                        "{}\n\n\
                        Valid backends: rest, local\n\
                        Example: dulich config backend local",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DulichError
pub type Result<T> = std::result::Result<T, DulichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_suggestions() {
        let err = DulichError::CapacityExceeded { day: 1, hours: 26.0 };
        let msg = err.display_with_suggestions();
        assert!(msg.contains("day 1"));
        assert!(msg.contains("26 hours"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_remote_suggestions() {
        let err = DulichError::Remote("connection refused".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Remote error: connection refused"));
        assert!(msg.contains("dulich config --list"));
    }

    #[test]
    fn test_config_invalid_backend_suggestions() {
        let err = DulichError::Config("Invalid backend: 'ftp'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("rest, local"));
    }

    #[test]
    fn test_date_format_suggestions() {
        let err = DulichError::Validation("Invalid date format: '01/06/2025'".to_string());
        assert_eq!(err.exit_code(), 3);
        let msg = err.display_with_suggestions();
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DulichError::Config("x".into()).exit_code(), 2);
        assert_eq!(
            DulichError::CapacityExceeded { day: 2, hours: 25.0 }.exit_code(),
            3
        );
        assert_eq!(DulichError::NotFound("x".into()).exit_code(), 4);
        assert_eq!(DulichError::Remote("x".into()).exit_code(), 5);
        assert_eq!(DulichError::NoCurrentItinerary.exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = DulichError::Validation("name is required".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Validation error: name is required");
    }
}
