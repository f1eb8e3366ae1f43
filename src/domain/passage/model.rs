//! Passage domain entity

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::domain::vehicle::VehicleType;

/// Zoned instant a vehicle passed a station
pub type PassageTime = DateTime<FixedOffset>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub registration: String,
    pub vehicle_type: VehicleType,
    pub passed_at: PassageTime,
}

impl Passage {
    pub fn new(
        registration: impl Into<String>,
        vehicle_type: VehicleType,
        passed_at: PassageTime,
    ) -> Self {
        Self {
            registration: registration.into(),
            vehicle_type,
            passed_at,
        }
    }

    /// Local calendar date of the passage
    pub fn date(&self) -> NaiveDate {
        self.passed_at.date_naive()
    }
}
