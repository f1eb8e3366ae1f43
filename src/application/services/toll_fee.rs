//! Toll fee service: records passages and prices a vehicle's day

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainError, DomainResult, FeeBreakdown, Passage, PassageRepository, PassageTime,
    TollCalculator, TollPolicy, VehicleType,
};

/// Service for passage registration and fee queries
pub struct TollFeeService {
    passages: Arc<dyn PassageRepository>,
    calculator: TollCalculator,
}

impl TollFeeService {
    pub fn new(passages: Arc<dyn PassageRepository>, calculator: TollCalculator) -> Self {
        Self {
            passages,
            calculator,
        }
    }

    pub fn policy(&self) -> &TollPolicy {
        self.calculator.policy()
    }

    pub fn passages(&self) -> &Arc<dyn PassageRepository> {
        &self.passages
    }

    /// Record a passage and return the vehicle's fee for that day so far.
    ///
    /// A vehicle keeps the type it was first seen with on a given day; a
    /// passage reporting a different type is rejected before it is recorded.
    pub async fn register_passage(
        &self,
        registration: &str,
        vehicle_type: VehicleType,
        passed_at: PassageTime,
    ) -> DomainResult<FeeBreakdown> {
        let date = passed_at.date_naive();

        if let Err(e) = self
            .passages
            .try_record_passage(Passage::new(registration, vehicle_type, passed_at))
            .await
        {
            if let DomainError::VehicleTypeMismatch { recorded, .. } = &e {
                warn!(
                    registration,
                    %recorded,
                    submitted = %vehicle_type,
                    "Vehicle type doesn't match an earlier passage"
                );
            }
            return Err(e);
        }
        metrics::counter!("toll_passages_total", "vehicle_type" => vehicle_type.as_str())
            .increment(1);

        let day = self.passages.passages_on(registration, date).await?;
        let breakdown = self.calculator.fee_breakdown(vehicle_type, &day)?;

        info!(
            registration,
            %vehicle_type,
            %passed_at,
            passages = day.len(),
            fee = breakdown.total,
            "Passage recorded"
        );
        if let Some(reason) = &breakdown.exemption {
            debug!(registration, %reason, "Passage is toll-free");
        }

        Ok(breakdown)
    }

    /// Current fee for a vehicle's day without recording anything.
    pub async fn daily_fee(&self, registration: &str, date: NaiveDate) -> DomainResult<FeeBreakdown> {
        let day = self.passages.passages_on(registration, date).await?;
        let vehicle_type = self.passages.vehicle_type_on(registration, date).await?;

        // Nothing recorded: the vehicle type is irrelevant to an empty day.
        let vehicle_type = vehicle_type.unwrap_or(VehicleType::Car);
        self.calculator.fee_breakdown(vehicle_type, &day)
    }
}
