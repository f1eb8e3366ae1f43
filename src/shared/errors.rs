use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::VehicleType;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Passages span more than one day: {expected} and {found}")]
    MixedDays { expected: NaiveDate, found: NaiveDate },

    #[error("Vehicle has multiple types")]
    MultipleVehicleTypes { registration: String, date: NaiveDate },

    #[error("Vehicle type doesn't match a previous passage")]
    VehicleTypeMismatch {
        recorded: VehicleType,
        submitted: VehicleType,
    },

    #[error("Invalid fare table: {0}")]
    InvalidFareTable(String),

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}
