//! Daily toll fee engine

use std::sync::Arc;

use chrono::NaiveDate;

use super::cluster::cluster_passages;
use crate::domain::exemption::{ExemptionPolicy, ExemptionReason};
use crate::domain::fare::{FareTable, Price};
use crate::domain::passage::PassageTime;
use crate::domain::vehicle::VehicleType;
use crate::shared::errors::{DomainError, DomainResult};

/// Immutable tariff configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TollPolicy {
    pub fares: FareTable,
    pub exemptions: ExemptionPolicy,
    /// Most a vehicle can be charged for one calendar day
    pub daily_cap: Price,
}

impl TollPolicy {
    pub fn new(fares: FareTable, exemptions: ExemptionPolicy, daily_cap: Price) -> Self {
        Self {
            fares,
            exemptions,
            daily_cap,
        }
    }
}

/// A cluster together with the price it was charged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCluster {
    pub passages: Vec<PassageTime>,
    pub price: Price,
}

/// How a day's fee was arrived at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// `None` when there were no passages
    pub date: Option<NaiveDate>,
    pub exemption: Option<ExemptionReason>,
    pub clusters: Vec<PricedCluster>,
    /// Sum of cluster prices before the cap
    pub subtotal: Price,
    pub daily_cap: Price,
    pub total: Price,
}

impl FeeBreakdown {
    fn free(date: Option<NaiveDate>, exemption: Option<ExemptionReason>, daily_cap: Price) -> Self {
        Self {
            date,
            exemption,
            clusters: Vec::new(),
            subtotal: 0,
            daily_cap,
            total: 0,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.subtotal > self.total
    }

    pub fn passage_count(&self) -> usize {
        self.clusters.iter().map(|c| c.passages.len()).sum()
    }
}

/// Computes one vehicle's fee for one day of passages.
///
/// Stateless apart from the shared policy; safe to call from any number of
/// tasks at once.
#[derive(Debug, Clone)]
pub struct TollCalculator {
    policy: Arc<TollPolicy>,
}

impl TollCalculator {
    pub fn new(policy: Arc<TollPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TollPolicy {
        &self.policy
    }

    /// Fee in whole currency units, between 0 and the daily cap.
    pub fn compute_fee(&self, vehicle: VehicleType, passages: &[PassageTime]) -> DomainResult<Price> {
        self.fee_breakdown(vehicle, passages).map(|b| b.total)
    }

    pub fn fee_breakdown(
        &self,
        vehicle: VehicleType,
        passages: &[PassageTime],
    ) -> DomainResult<FeeBreakdown> {
        let cap = self.policy.daily_cap;

        let Some(date) = common_date(passages)? else {
            return Ok(FeeBreakdown::free(None, None, cap));
        };

        if let Some(reason) = self.policy.exemptions.exemption_for(vehicle, date) {
            return Ok(FeeBreakdown::free(Some(date), Some(reason), cap));
        }

        let clusters: Vec<PricedCluster> = cluster_passages(passages)
            .into_iter()
            .map(|cluster| PricedCluster {
                price: cluster.price(&self.policy.fares),
                passages: cluster.passages().to_vec(),
            })
            .collect();

        let subtotal = clusters
            .iter()
            .fold(0, |acc: Price, c| acc.saturating_add(c.price));

        Ok(FeeBreakdown {
            date: Some(date),
            exemption: None,
            clusters,
            subtotal,
            daily_cap: cap,
            total: subtotal.min(cap),
        })
    }
}

/// The single calendar date shared by all passages, `None` for no passages.
fn common_date(passages: &[PassageTime]) -> DomainResult<Option<NaiveDate>> {
    let Some(first) = passages.first() else {
        return Ok(None);
    };
    let expected = first.date_naive();

    match passages.iter().map(|p| p.date_naive()).find(|d| *d != expected) {
        Some(found) => Err(DomainError::MixedDays { expected, found }),
        None => Ok(Some(expected)),
    }
}

// ── Tests ──────────────────────────────────────────────────────
