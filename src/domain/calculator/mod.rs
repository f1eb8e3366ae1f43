//! Fee calculation
//!
//! Groups a day's passages into hour clusters, prices each cluster at its most
//! expensive passage and caps the daily sum.

pub mod cluster;
pub mod engine;

pub use cluster::{cluster_passages, PassageCluster, CLUSTER_WINDOW_MINUTES};
pub use engine::{FeeBreakdown, PricedCluster, TollCalculator, TollPolicy};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use chrono::{FixedOffset, Month, NaiveDate, NaiveDateTime, Weekday};

    use super::TollPolicy;
    use crate::domain::{ExemptionPolicy, FareBreakpoint, FareTable, PassageTime, VehicleType};

    /// Gothenburg congestion tax as of 2022.
    pub fn gothenburg_policy() -> Arc<TollPolicy> {
        let fares = FareTable::new(vec![
            FareBreakpoint::new(0, 0, 0),
            FareBreakpoint::new(6, 0, 9),
            FareBreakpoint::new(6, 30, 16),
            FareBreakpoint::new(7, 0, 22),
            FareBreakpoint::new(8, 0, 16),
            FareBreakpoint::new(8, 30, 9),
            FareBreakpoint::new(15, 0, 16),
            FareBreakpoint::new(15, 30, 22),
            FareBreakpoint::new(17, 0, 16),
            FareBreakpoint::new(18, 0, 9),
            FareBreakpoint::new(18, 30, 0),
        ])
        .unwrap();

        let dates = [
            "2022-01-05", "2022-01-06", "2022-04-14", "2022-04-15", "2022-04-18", "2022-05-25",
            "2022-05-26", "2022-06-06", "2022-06-24", "2022-11-04", "2022-12-26",
        ]
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap());

        let exemptions = ExemptionPolicy::new(
            [Month::July],
            [Weekday::Sat, Weekday::Sun],
            dates,
            [
                VehicleType::Motorbike,
                VehicleType::Tractor,
                VehicleType::Emergency,
                VehicleType::Diplomat,
                VehicleType::Foreign,
                VehicleType::Military,
            ],
        );

        Arc::new(TollPolicy::new(fares, exemptions, 60))
    }

    /// `YYYY-MM-DD HH:MM:SS` in a fixed CET offset.
    pub fn at(raw: &str) -> PassageTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(3600).unwrap())
            .unwrap()
    }
}
