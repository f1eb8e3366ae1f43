//! Passage repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Passage, PassageTime};
use crate::domain::vehicle::VehicleType;
use crate::domain::DomainResult;

#[async_trait]
pub trait PassageRepository: Send + Sync {
    async fn record_passage(&self, passage: Passage) -> DomainResult<()>;

    /// Record `passage` unless its registration already has a different
    /// vehicle type on that day.
    ///
    /// The type check and the insert are atomic with respect to other calls.
    /// Fails with `VehicleTypeMismatch`, or `MultipleVehicleTypes` when the
    /// day's history is already inconsistent.
    async fn try_record_passage(&self, passage: Passage) -> DomainResult<()>;

    /// All passages of `registration` on `date`, earliest first.
    async fn passages_on(&self, registration: &str, date: NaiveDate)
        -> DomainResult<Vec<PassageTime>>;

    /// The vehicle type recorded for `registration` on `date`.
    ///
    /// Fails with `DomainError::MultipleVehicleTypes` when the day's history
    /// holds more than one distinct type.
    async fn vehicle_type_on(
        &self,
        registration: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<VehicleType>>;

    /// Number of registrations with at least one recorded passage.
    async fn tracked_registrations(&self) -> DomainResult<usize>;
}
