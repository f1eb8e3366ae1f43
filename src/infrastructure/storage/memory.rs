//! In-memory passage store

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Passage, PassageRepository, PassageTime, VehicleType,
};

/// Passage history per registration, kept for the lifetime of the process
#[derive(Default)]
pub struct InMemoryPassageRepository {
    passages: DashMap<String, Vec<Passage>>,
}

impl InMemoryPassageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PassageRepository for InMemoryPassageRepository {
    async fn record_passage(&self, passage: Passage) -> DomainResult<()> {
        self.passages
            .entry(passage.registration.clone())
            .or_default()
            .push(passage);
        Ok(())
    }

    async fn passages_on(
        &self,
        registration: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<PassageTime>> {
        let mut times: Vec<PassageTime> = self
            .passages
            .get(registration)
            .map(|history| {
                history
                    .iter()
                    .filter(|p| p.date() == date)
                    .map(|p| p.passed_at)
                    .collect()
            })
            .unwrap_or_default();
        times.sort();
        Ok(times)
    }

    async fn try_record_passage(&self, passage: Passage) -> DomainResult<()> {
        let mut history = self
            .passages
            .entry(passage.registration.clone())
            .or_default();

        if let Some(recorded) =
            day_vehicle_type(&history, &passage.registration, passage.date())?
        {
            if recorded != passage.vehicle_type {
                return Err(DomainError::VehicleTypeMismatch {
                    recorded,
                    submitted: passage.vehicle_type,
                });
            }
        }
        history.push(passage);
        Ok(())
    }

    async fn vehicle_type_on(
        &self,
        registration: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<VehicleType>> {
        match self.passages.get(registration) {
            Some(history) => day_vehicle_type(&history, registration, date),
            None => Ok(None),
        }
    }

    async fn tracked_registrations(&self) -> DomainResult<usize> {
        Ok(self.passages.len())
    }
}

/// The single vehicle type recorded in `history` on `date`, if any.
fn day_vehicle_type(
    history: &[Passage],
    registration: &str,
    date: NaiveDate,
) -> DomainResult<Option<VehicleType>> {
    let mut types = history
        .iter()
        .filter(|p| p.date() == date)
        .map(|p| p.vehicle_type);

    let Some(first) = types.next() else {
        return Ok(None);
    };
    if types.any(|t| t != first) {
        return Err(DomainError::MultipleVehicleTypes {
            registration: registration.to_string(),
            date,
        });
    }
    Ok(Some(first))
}
